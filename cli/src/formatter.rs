use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Row, Table};
use gomin::{Finding, BASELINE};

pub struct Formatter {}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter {
    pub fn new() -> Self {
        Self {}
    }

    /// `go 1.N` and the reason for it.
    pub fn format_finding(&self, finding: &Finding) -> String {
        let mut output = format!("go 1.{}\n", finding.version);
        match &finding.evidence {
            Some(evidence) => output.push_str(&format!(
                "  required by {}:{}: {}\n",
                evidence.file, evidence.span, evidence.description
            )),
            None if finding.version > BASELINE => {
                output.push_str("  declared by a required module\n")
            }
            None => {}
        }
        output
    }

    pub fn format_json(&self, finding: &Finding) -> serde_json::Result<String> {
        serde_json::to_string_pretty(finding)
    }

    /// One row per package, then the module result.
    pub fn format_explain(&self, packages: &[(&str, Finding)], module: &Finding) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(Row::from(vec![
            Cell::new("Package").set_alignment(CellAlignment::Left),
            Cell::new("Go").set_alignment(CellAlignment::Right),
            Cell::new("Required by").set_alignment(CellAlignment::Left),
        ]));

        for (path, finding) in packages {
            table.add_row(self.row(path, finding));
        }
        table.add_row(self.row("(module)", module));

        format!("{}\n", table)
    }

    fn row(&self, name: &str, finding: &Finding) -> Row {
        let evidence = match &finding.evidence {
            Some(evidence) => format!(
                "{}:{} {}",
                evidence.file, evidence.span, evidence.description
            ),
            None if finding.version > BASELINE => "requirements".to_string(),
            None => "-".to_string(),
        };
        Row::from(vec![
            Cell::new(name),
            Cell::new(format!("1.{}", finding.version)).set_alignment(CellAlignment::Right),
            Cell::new(evidence),
        ])
    }

    pub fn format_lookup(&self, package: &str, owner: Option<&str>, name: &str, release: u32) -> String {
        match owner {
            Some(owner) => format!("\"{}\".{}.{}: go 1.{}\n", package, owner, name, release),
            None => format!("\"{}\".{}: go 1.{}\n", package, name, release),
        }
    }
}
