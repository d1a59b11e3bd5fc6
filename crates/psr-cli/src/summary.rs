use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde_json::Value;

use psr_cli::pipeline::StagedSession;
use psr_client::sha256_hex;
use psr_model::{FieldAccess, all_fields};

use crate::commands::SubmitRun;

pub fn print_fields() {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Group"),
        header_cell("Kind"),
        header_cell("Access"),
    ]);
    apply_table_style(&mut table);
    for field in all_fields() {
        let access = match field.access() {
            FieldAccess::Editable => Cell::new("editable")
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
            FieldAccess::ReadOnly => dim_cell("read-only"),
        };
        table.add_row(vec![
            Cell::new(field.wire_name())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(field.group().as_str()),
            Cell::new(format!("{}", field.kind())),
            access,
        ]);
    }
    println!("{table}");
}

pub fn print_review(staged: &StagedSession) {
    let session = &staged.session;
    let (policy_number, member_number) = session.working().identifiers();
    println!("Policy: {policy_number}");
    println!("Member: {member_number}");

    print_rejections(staged);
    print_findings(staged);
    print_changes(staged);
    print_documents(staged);
    print_bank_details();

    if session.is_submittable() {
        println!("Ready to submit.");
    } else {
        println!("Not submittable: fix the reported problems and attach a document.");
    }
}

pub fn print_submit(run: &SubmitRun) {
    print_review(&run.staged);
    println!();
    if run.report.success {
        println!("{}", run.report.notice);
        println!("Service request written to {}", run.output_dir.display());
    } else {
        println!("Submission failed: {}", run.report.notice);
    }
}

fn print_rejections(staged: &StagedSession) {
    if staged.screening.rejected.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("File"), header_cell("Problem")]);
    apply_table_style(&mut table);
    for rejection in &staged.screening.rejected {
        table.add_row(vec![
            Cell::new(&rejection.file_name).fg(Color::Red),
            Cell::new(&rejection.message),
        ]);
    }
    println!();
    println!("Rejected files:");
    println!("{table}");
}

fn print_findings(staged: &StagedSession) {
    let findings = staged.session.field_errors();
    if findings.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Problem")]);
    apply_table_style(&mut table);
    for finding in &findings {
        table.add_row(vec![
            Cell::new(finding.field.wire_name())
                .fg(Color::Red)
                .add_attribute(Attribute::Bold),
            Cell::new(&finding.message),
        ]);
    }
    println!();
    println!("Validation:");
    println!("{table}");
}

fn print_changes(staged: &StagedSession) {
    let change_set = staged.session.change_set();
    println!();
    if change_set.is_empty() {
        println!("No changes made");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Old Value"),
        header_cell("New Value"),
    ]);
    apply_table_style(&mut table);
    for entry in &change_set.modified_fields {
        table.add_row(vec![
            Cell::new(&entry.field)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            dim_cell(render_value(&entry.old_value)),
            Cell::new(render_value(&entry.new_value))
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);
    }
    println!("Changes:");
    println!("{table}");
}

fn print_documents(staged: &StagedSession) {
    let attachments = staged.session.attachments();
    println!();
    if attachments.is_empty() {
        println!("No documents uploaded");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Bytes"),
        header_cell("SHA-256"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for attachment in attachments {
        let digest = sha256_hex(&attachment.bytes);
        table.add_row(vec![
            Cell::new(&attachment.file_name),
            Cell::new(attachment.size()),
            dim_cell(&digest[..12]),
        ]);
    }
    println!("Documents:");
    println!("{table}");
}

/// The bank panel is fixed reference data, shown for context and never part
/// of the change-set.
fn print_bank_details() {
    let bank = psr_reference::bank_reference();
    let mut table = Table::new();
    table.set_header(vec![header_cell("Bank Detail"), header_cell("Value")]);
    apply_table_style(&mut table);
    table.add_row(vec![
        Cell::new("Member Bank Account Number"),
        dim_cell(&bank.member_bank_account),
    ]);
    table.add_row(vec![
        Cell::new("Member IFSC Code"),
        dim_cell(&bank.member_ifsc),
    ]);
    table.add_row(vec![
        Cell::new("Member Bank Address"),
        dim_cell(&bank.member_bank_address),
    ]);
    table.add_row(vec![
        Cell::new("MPH Bank Account Number"),
        dim_cell(&bank.mph_bank_account),
    ]);
    table.add_row(vec![Cell::new("MPH IFSC Code"), dim_cell(&bank.mph_ifsc)]);
    table.add_row(vec![
        Cell::new("MPH Bank Address"),
        dim_cell(&bank.mph_bank_address),
    ]);
    println!();
    println!("Bank Details:");
    println!("{table}");
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
