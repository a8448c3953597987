//! Collection workflow phase taxonomy.
//!
//! Phase names arrive verbatim from the upstream pipeline (Portuguese,
//! exact spelling and casing). This module owns which of them are worked
//! on, how the board orders them, and how they render.

/// Phases whose cards are actionable and fetched for listing.
pub const ACTIONABLE_PHASES: [&str; 9] = [
    "Fila de Recolha",
    "Aprovar Custo de Recolha",
    "Tentativa 1 de Recolha",
    "Tentativa 2 de Recolha",
    "Tentativa 3 de Recolha",
    "Desbloquear Veículo",
    "Solicitar Guincho",
    "Tentativa 4 de Recolha",
    "Confirmação de Entrega no Pátio",
];

/// Column order of the board view.
///
/// Note this is not the actionable set: the board adds two display-only
/// columns and carries no column for "Tentativa 4 de Recolha", whose cards
/// are fetched but not shown.
pub const BOARD_PHASE_ORDER: [&str; 10] = [
    "Fila de Recolha",
    "Aprovar Custo de Recolha",
    "Tentativa 1 de Recolha",
    "Tentativa 2 de Recolha",
    "Tentativa 3 de Recolha",
    "Nova tentativa de recolha",
    "Desbloquear Veículo",
    "Solicitar Guincho",
    "Dificuldade na Recolha",
    "Confirmação de Entrega no Pátio",
];

/// Short column title for a phase.
pub fn display_name(phase: &str) -> &str {
    match phase {
        "Aprovar Custo de Recolha" => "Aprovar Custo",
        "Tentativa 1 de Recolha" => "Tentativa 1",
        "Tentativa 2 de Recolha" => "Tentativa 2",
        "Tentativa 3 de Recolha" => "Tentativa 3",
        "Tentativa 4 de Recolha" => "Tentativa 4",
        "Nova tentativa de recolha" => "Nova Tentativa",
        "Confirmação de Entrega no Pátio" => "Confirmação de Recolha",
        other => other,
    }
}

/// Explanation shown when a phase's cards cannot be acted on, if any.
pub fn disabled_message(phase: &str) -> Option<&'static str> {
    match phase {
        "Aprovar Custo de Recolha" => Some("em análise da Kovi"),
        "Desbloquear Veículo" => Some("em processo de desbloqueio"),
        "Solicitar Guincho" => Some("em análise da Kovi"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actionable_set_has_the_expected_members() {
        assert_eq!(ACTIONABLE_PHASES.len(), 9);
        assert!(ACTIONABLE_PHASES.contains(&"Fila de Recolha"));
        assert!(ACTIONABLE_PHASES.contains(&"Confirmação de Entrega no Pátio"));
        assert!(!ACTIONABLE_PHASES.contains(&"Nova tentativa de recolha"));
        assert!(!ACTIONABLE_PHASES.contains(&"Dificuldade na Recolha"));
    }

    #[test]
    fn fourth_attempt_is_fetched_but_has_no_column() {
        assert!(ACTIONABLE_PHASES.contains(&"Tentativa 4 de Recolha"));
        assert!(!BOARD_PHASE_ORDER.contains(&"Tentativa 4 de Recolha"));
    }

    #[test]
    fn board_order_starts_at_the_queue_and_ends_at_delivery() {
        assert_eq!(BOARD_PHASE_ORDER.first(), Some(&"Fila de Recolha"));
        assert_eq!(
            BOARD_PHASE_ORDER.last(),
            Some(&"Confirmação de Entrega no Pátio")
        );
    }

    #[test]
    fn display_names_shorten_known_phases() {
        assert_eq!(display_name("Aprovar Custo de Recolha"), "Aprovar Custo");
        assert_eq!(display_name("Tentativa 2 de Recolha"), "Tentativa 2");
        assert_eq!(display_name("Nova tentativa de recolha"), "Nova Tentativa");
        assert_eq!(
            display_name("Confirmação de Entrega no Pátio"),
            "Confirmação de Recolha"
        );
    }

    #[test]
    fn unknown_phases_display_verbatim() {
        assert_eq!(display_name("Fila de Recolha"), "Fila de Recolha");
        assert_eq!(display_name("Fase Inédita"), "Fase Inédita");
    }

    #[test]
    fn only_held_phases_carry_a_disabled_message() {
        assert_eq!(
            disabled_message("Aprovar Custo de Recolha"),
            Some("em análise da Kovi")
        );
        assert_eq!(
            disabled_message("Desbloquear Veículo"),
            Some("em processo de desbloqueio")
        );
        assert_eq!(
            disabled_message("Solicitar Guincho"),
            Some("em análise da Kovi")
        );
        assert_eq!(disabled_message("Fila de Recolha"), None);
        assert_eq!(disabled_message("Tentativa 1 de Recolha"), None);
    }
}
