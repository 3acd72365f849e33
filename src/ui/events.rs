// ============================================================================
// Gestion des événements
// ============================================================================
// Lit les événements clavier du terminal et fournit des prédicats pour les
// reconnaître (is_quit_event, is_tab_event, ...)
// ============================================================================

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Délai d'attente d'un événement avant de renvoyer Tick
///
/// Les réponses réseau sont appliquées entre deux événements : un délai court
/// les affiche rapidement.
const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Événements de l'application
#[derive(Debug, Clone)]
pub enum Event {
    /// Touche pressée
    Key(KeyEvent),

    /// Pas d'événement pendant POLL_TIMEOUT (ou événement ignoré)
    Tick,
}

/// Gestionnaire d'événements
pub struct EventHandler;

impl EventHandler {
    pub fn new() -> Self {
        Self
    }

    /// Lit le prochain événement (bloquant avec timeout)
    ///
    /// CONCEPT : Non-blocking I/O avec timeout
    /// - poll(timeout) attend au plus POLL_TIMEOUT
    /// - Si pas d'événement, retourne Ok(Event::Tick)
    pub fn next(&self) -> Result<Event> {
        if event::poll(POLL_TIMEOUT)? {
            match event::read()? {
                // Sur certains OS, on reçoit Press ET Release : on ne garde que Press
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Ok(Event::Key(key)),
                _ => Ok(Event::Tick),
            }
        } else {
            Ok(Event::Tick)
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Prédicats
// ============================================================================

/// Code de la touche, si c'est un événement clavier
fn key_code(event: &Event) -> Option<KeyCode> {
    match event {
        Event::Key(key) => Some(key.code),
        Event::Tick => None,
    }
}

/// 'q' (quitter, avec confirmation)
pub fn is_quit_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Char('q') | KeyCode::Char('Q')))
}

/// Ctrl-C : sortie immédiate, même pendant la saisie
pub fn is_interrupt_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
    } else {
        false
    }
}

pub fn is_escape_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Esc))
}

pub fn is_enter_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Enter))
}

pub fn is_backspace_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Backspace))
}

/// Tab : page suivante
pub fn is_tab_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Tab))
}

/// Shift-Tab : page précédente
pub fn is_back_tab_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::BackTab))
}

/// Flèche haut ou 'k' (vim)
pub fn is_up_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Up | KeyCode::Char('k')))
}

/// Flèche bas ou 'j' (vim)
pub fn is_down_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Down | KeyCode::Char('j')))
}

/// Flèche gauche ou 'h' (vim)
pub fn is_left_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Left | KeyCode::Char('h')))
}

/// Flèche droite ou 'l' (vim)
pub fn is_right_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Right | KeyCode::Char('l')))
}

/// Flèches seules (pendant la saisie, les lettres sont du texte)
pub fn is_arrow_up_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Up))
}

pub fn is_arrow_down_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Down))
}

/// Enter ou Espace : presser le bouton sous le curseur
pub fn is_activate_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Enter | KeyCode::Char(' ')))
}

/// ']' : année / trimestre suivant
pub fn is_next_period_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Char(']')))
}

/// '[' : année / trimestre précédent
pub fn is_previous_period_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Char('[')))
}

/// '1', '2', '3' : accès direct à une page (index 0, 1, 2)
pub fn page_shortcut(event: &Event) -> Option<usize> {
    match key_code(event) {
        Some(KeyCode::Char(c @ '1'..='3')) => c.to_digit(10).map(|d| d as usize - 1),
        _ => None,
    }
}

/// Touche caractère sans Ctrl/Alt
pub fn get_char_from_event(event: &Event) -> Option<char> {
    if let Event::Key(key) = event {
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return None;
        }
        if let KeyCode::Char(c) = key.code {
            return Some(c);
        }
    }
    None
}

/// Vérifie que l'événement est un caractère donné (sans Ctrl/Alt)
pub fn is_char_event(event: &Event, expected: char) -> bool {
    get_char_from_event(event) == Some(expected)
}

// ============================================================================
// Tests
// ============================================================================
