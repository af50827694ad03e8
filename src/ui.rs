//! UI presentation — a pure projection of session state onto the two
//! reader controls. The host applies the returned views to its actual
//! buttons (enabled/disabled, ARIA label, visible label).

use serde::Deserialize;

/// Observable state of one control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlView {
    pub enabled: bool,
    pub aria_label: String,
    pub label: String,
}

/// Both reader controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderControls {
    pub read: ControlView,
    pub stop: ControlView,
}

/// Label strings for every control state. Defaults match the Portuguese
/// host the reader was built for; relabel via config for other locales.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiLabels {
    /// Visible label of the read control when a fresh read would start.
    pub read: String,
    /// ARIA label of the read control when a fresh read would start.
    pub read_aria: String,
    /// Both labels of the read control while speaking.
    pub reading: String,
    /// Visible label of the read control when resuming is possible.
    pub continue_reading: String,
    /// ARIA label of the read control when resuming is possible.
    pub continue_aria: String,
    /// Labels of the stop control (no state-dependent variation).
    pub stop: String,
    pub stop_aria: String,
    /// Shown on both controls when speech synthesis is unavailable.
    pub unsupported: String,
}

impl Default for UiLabels {
    fn default() -> Self {
        Self {
            read: "Ler".into(),
            read_aria: "Ler".into(),
            reading: "Lendo...".into(),
            continue_reading: "Continuar".into(),
            continue_aria: "Continuar leitura".into(),
            stop: "Parar".into(),
            stop_aria: "Parar leitura".into(),
            unsupported: "Leitor não suportado.".into(),
        }
    }
}

/// Project session state onto the controls.
///
/// Speaking disables the read control. Idle with a resume point and no
/// active selection offers to continue; any other idle state offers a
/// fresh read. The stop control never varies.
pub fn present(labels: &UiLabels, speaking: bool, has_resume: bool, has_selection: bool) -> ReaderControls {
    let read = if speaking {
        ControlView {
            enabled: false,
            aria_label: labels.reading.clone(),
            label: labels.reading.clone(),
        }
    } else if has_resume && !has_selection {
        ControlView {
            enabled: true,
            aria_label: labels.continue_aria.clone(),
            label: labels.continue_reading.clone(),
        }
    } else {
        ControlView {
            enabled: true,
            aria_label: labels.read_aria.clone(),
            label: labels.read.clone(),
        }
    };
    ReaderControls {
        read,
        stop: ControlView {
            enabled: true,
            aria_label: labels.stop_aria.clone(),
            label: labels.stop.clone(),
        },
    }
}

/// Both controls disabled with an explanatory label; used once, when the
/// engine capability is absent.
pub fn present_unsupported(labels: &UiLabels) -> ReaderControls {
    let disabled = ControlView {
        enabled: false,
        aria_label: labels.unsupported.clone(),
        label: labels.unsupported.clone(),
    };
    ReaderControls { read: disabled.clone(), stop: disabled }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn labels() -> UiLabels {
        UiLabels::default()
    }

    #[test]
    fn test_speaking_disables_read() {
        let controls = present(&labels(), true, false, false);
        assert!(!controls.read.enabled);
        assert_eq!(controls.read.aria_label, "Lendo...");
        assert!(controls.stop.enabled);
    }

    #[test]
    fn test_idle_with_resume_offers_continue() {
        let controls = present(&labels(), false, true, false);
        assert!(controls.read.enabled);
        assert_eq!(controls.read.label, "Continuar");
        assert_eq!(controls.read.aria_label, "Continuar leitura");
    }

    #[test]
    fn test_selection_overrides_continue() {
        // A new selection is a new intent, so the control reads fresh.
        let controls = present(&labels(), false, true, true);
        assert_eq!(controls.read.label, "Ler");
    }

    #[test]
    fn test_idle_without_resume_offers_read() {
        let controls = present(&labels(), false, false, false);
        assert_eq!(controls.read.label, "Ler");
        assert_eq!(controls.read.aria_label, "Ler");
    }

    #[test]
    fn test_stop_control_never_varies() {
        let a = present(&labels(), true, false, false).stop;
        let b = present(&labels(), false, true, true).stop;
        assert_eq!(a, b);
    }

    #[test]
    fn test_unsupported_disables_everything() {
        let controls = present_unsupported(&labels());
        assert!(!controls.read.enabled);
        assert!(!controls.stop.enabled);
        assert_eq!(controls.read.label, "Leitor não suportado.");
    }

    #[test]
    fn test_labels_from_json() {
        let labels: UiLabels =
            serde_json::from_str(r#"{ "read": "Read", "reading": "Reading…" }"#).unwrap();
        let controls = present(&labels, true, false, false);
        assert_eq!(controls.read.label, "Reading…");
        // unspecified labels keep their defaults
        assert_eq!(controls.stop.label, "Parar");
    }
}
