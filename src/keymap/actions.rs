//! Semantic actions that key bindings resolve to.

use serde::{Deserialize, Serialize};

/// Every user action the screens understand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    // Cursor movement in the picker, panning on the orphanages map
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,

    // Marker selection on the orphanages map
    NextMarker,
    PrevMarker,

    ZoomIn,
    ZoomOut,

    /// Activate the selected callout / confirm a position
    Confirm,
    /// Go back
    Cancel,
    /// Start registering a new orphanage
    Create,
    /// Re-fetch the current screen's data
    Refresh,

    Quit,
    Help,
}

impl Action {
    /// Human-readable description, shown in the help overlay
    pub fn description(&self) -> &'static str {
        match self {
            Action::MoveUp => "Mover para cima",
            Action::MoveDown => "Mover para baixo",
            Action::MoveLeft => "Mover para a esquerda",
            Action::MoveRight => "Mover para a direita",
            Action::NextMarker => "Próximo orfanato",
            Action::PrevMarker => "Orfanato anterior",
            Action::ZoomIn => "Aproximar o mapa",
            Action::ZoomOut => "Afastar o mapa",
            Action::Confirm => "Abrir detalhes / confirmar",
            Action::Cancel => "Voltar",
            Action::Create => "Cadastrar um novo orfanato",
            Action::Refresh => "Atualizar",
            Action::Quit => "Sair",
            Action::Help => "Mostrar ajuda",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_serializes_snake_case() {
        let json = serde_json::to_string(&Action::NextMarker).unwrap();
        assert_eq!(json, "\"next_marker\"");
    }
}
