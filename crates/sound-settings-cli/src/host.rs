// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Terminal widget and dialog hosts.

use comfy_table::Table;
use sound_settings_core::{
    DialogPort, DialogRequest, DialogResponse, FieldId, WidgetPort, WidgetValue,
};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io::{BufRead, Write};
use std::rc::Rc;

#[derive(Debug, Clone)]
struct Row {
    value: WidgetValue,
    summary: Option<String>,
    enabled: bool,
}

impl Default for Row {
    fn default() -> Self {
        Self {
            value: WidgetValue::Unset,
            summary: None,
            enabled: true,
        }
    }
}

/// Keeps the state of every control so it can be rendered as a table.
#[derive(Clone, Default)]
pub struct TerminalWidgets {
    rows: Rc<RefCell<BTreeMap<FieldId, Row>>>,
}

impl TerminalWidgets {
    /// Render every control in declaration order.
    pub fn table(&self) -> Table {
        let rows = self.rows.borrow();
        let mut table = Table::new();
        table.set_header(vec!["Setting", "Value", "Summary", "Enabled"]);
        for field in FieldId::ALL {
            let row = rows.get(&field).cloned().unwrap_or_default();
            table.add_row(vec![
                field.key().to_string(),
                row.value.to_string(),
                row.summary.unwrap_or_default(),
                if row.enabled { "yes" } else { "no" }.to_string(),
            ]);
        }
        table
    }
}

impl WidgetPort for TerminalWidgets {
    fn set_value(&self, field: FieldId, value: &WidgetValue) {
        self.rows.borrow_mut().entry(field).or_default().value = value.clone();
    }

    fn set_summary(&self, field: FieldId, summary: &str) {
        self.rows.borrow_mut().entry(field).or_default().summary = Some(summary.to_string());
    }

    fn set_enabled(&self, field: FieldId, enabled: bool) {
        self.rows.borrow_mut().entry(field).or_default().enabled = enabled;
    }

    fn listen(&self, _field: FieldId) {
        // Changes arrive from the command line, not from the table.
    }
}

/// Holds the dialog the screen asked for until the CLI answers it.
#[derive(Clone, Default)]
pub struct TerminalDialogs {
    open: Rc<RefCell<Option<DialogRequest>>>,
}

impl TerminalDialogs {
    /// Take the open dialog, if any.
    pub fn take(&self) -> Option<DialogRequest> {
        self.open.borrow_mut().take()
    }
}

impl DialogPort for TerminalDialogs {
    fn show(&self, request: &DialogRequest) {
        *self.open.borrow_mut() = Some(request.clone());
    }

    fn dismiss(&self) {
        self.open.borrow_mut().take();
    }
}

/// Print `request` and read the answer; EOF counts as a dismissal.
pub fn prompt(
    request: &DialogRequest,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> std::io::Result<DialogResponse> {
    writeln!(out, "{}", request.title)?;
    writeln!(out, "{}", request.message)?;
    write!(
        out,
        "[{} = y / {} = n] ",
        request.accept_label, request.cancel_label
    )?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        writeln!(out)?;
        return Ok(DialogResponse::Dismiss);
    }
    Ok(match line.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "ok" => DialogResponse::Accept,
        _ => DialogResponse::Cancel,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use sound_settings_core::gate::ConfirmationGate;
    use sound_settings_core::GateKind;

    fn request() -> DialogRequest {
        ConfirmationGate::new().request(GateKind::CameraSound).unwrap()
    }

    #[test]
    fn prompt_maps_answers() {
        let mut out = Vec::new();
        let accept = prompt(&request(), &mut "yes\n".as_bytes(), &mut out).unwrap();
        assert_eq!(accept, DialogResponse::Accept);
        let cancel = prompt(&request(), &mut "n\n".as_bytes(), &mut out).unwrap();
        assert_eq!(cancel, DialogResponse::Cancel);
        let dismiss = prompt(&request(), &mut "".as_bytes(), &mut out).unwrap();
        assert_eq!(dismiss, DialogResponse::Dismiss);
        assert!(String::from_utf8(out).unwrap().contains("Attention"));
    }

    #[test]
    fn table_lists_every_field() {
        let widgets = TerminalWidgets::default();
        widgets.set_value(FieldId::DashGap, &WidgetValue::Int(10));
        widgets.set_enabled(FieldId::DashGap, false);
        let rendered = widgets.table().to_string();
        for field in FieldId::ALL {
            assert!(rendered.contains(field.key()), "{field}");
        }
    }

    #[test]
    fn dismiss_clears_open_dialog() {
        let dialogs = TerminalDialogs::default();
        dialogs.show(&request());
        dialogs.dismiss();
        assert!(dialogs.take().is_none());
    }
}
