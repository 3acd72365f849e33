// ============================================================================
// Gestion des touches
// ============================================================================
// Traduit un événement clavier en modification de l'état, et renvoie la
// Command à exécuter si l'action déclenche une requête.
//
// Raccourcis globaux (hors saisie) :
//   q q        quitter (deux pressions)     Ctrl-C   quitter tout de suite
//   Tab/S-Tab  page suivante / précédente   1 2 3    accès direct
//
// 종목검색 :
//   / ou Enter  saisir              h l  choisir la série
//   y  série annuelle   u  série trimestrielle   n  actualités   r  remise à zéro
//
// Classements :
//   h l  choisir la métrique   Enter/Espace  sélectionner
//   [ ]  année / trimestre     j k           parcourir le tableau
// ============================================================================

use tracing::{debug, info};

use crate::app::{App, Page};
use crate::dispatcher::Command;
use crate::ui::events::{
    get_char_from_event, is_activate_event, is_arrow_down_event, is_arrow_up_event,
    is_back_tab_event, is_backspace_event, is_char_event, is_down_event, is_enter_event,
    is_escape_event, is_interrupt_event, is_left_event, is_next_period_event,
    is_previous_period_event, is_quit_event, is_right_event, is_tab_event, is_up_event,
    page_shortcut, Event,
};

/// Traite un événement et renvoie la requête éventuelle à lancer
pub fn handle_event(app: &mut App, event: &Event) -> Option<Command> {
    if matches!(event, Event::Tick) {
        return None;
    }

    if is_interrupt_event(event) {
        info!("User interrupted");
        app.quit();
        return None;
    }

    // La saisie capture tout, y compris 'q' et les chiffres
    if app.is_editing() {
        return handle_search_input(app, event);
    }

    if is_quit_event(event) {
        if app.is_awaiting_quit_confirmation() {
            info!("User confirmed quit");
            app.quit();
        } else {
            info!("User requested quit (awaiting confirmation)");
            app.request_quit();
        }
        return None;
    }

    // Toute autre touche annule la confirmation
    app.cancel_quit();

    if is_tab_event(event) {
        app.next_page();
        return None;
    }
    if is_back_tab_event(event) {
        app.previous_page();
        return None;
    }
    if let Some(index) = page_shortcut(event) {
        app.show_page(Page::ALL[index]);
        return None;
    }

    match app.current_page {
        Page::Search => handle_search_keys(app, event),
        Page::AnnualRanking => handle_annual_keys(app, event),
        Page::QuarterlyRanking => handle_quarterly_keys(app, event),
    }
}

/// Saisie de la recherche (mode input)
fn handle_search_input(app: &mut App, event: &Event) -> Option<Command> {
    let search = &mut app.search;

    if is_escape_event(event) {
        debug!("User left search input");
        search.stop_editing();
        None
    } else if is_enter_event(event) {
        search.confirm()
    } else if is_backspace_event(event) {
        search.pop_char()
    } else if is_arrow_down_event(event) {
        search.suggestion_down();
        None
    } else if is_arrow_up_event(event) {
        search.suggestion_up();
        None
    } else if let Some(c) = get_char_from_event(event) {
        search.push_char(c)
    } else {
        None
    }
}

fn handle_search_keys(app: &mut App, event: &Event) -> Option<Command> {
    let search = &mut app.search;

    if is_char_event(event, '/') || is_enter_event(event) {
        search.start_editing();
        None
    } else if is_left_event(event) {
        search.previous_metric();
        None
    } else if is_right_event(event) {
        search.next_metric();
        None
    } else if is_char_event(event, 'y') {
        let label = search.focused_metric().label();
        search.request_annual(label)
    } else if is_char_event(event, 'u') {
        let label = search.focused_metric().label();
        search.request_quarterly(label)
    } else if is_char_event(event, 'n') {
        search.request_news()
    } else if is_char_event(event, 'r') {
        info!("User reset search page");
        search.reset();
        None
    } else {
        None
    }
}

fn handle_annual_keys(app: &mut App, event: &Event) -> Option<Command> {
    let page = &mut app.annual;

    if is_left_event(event) {
        page.cursor_left();
        None
    } else if is_right_event(event) {
        page.cursor_right();
        None
    } else if is_activate_event(event) {
        page.select_cursor()
    } else if is_next_period_event(event) {
        page.next_year()
    } else if is_previous_period_event(event) {
        page.previous_year()
    } else if is_down_event(event) {
        page.view.row_down();
        None
    } else if is_up_event(event) {
        page.view.row_up();
        None
    } else {
        None
    }
}

fn handle_quarterly_keys(app: &mut App, event: &Event) -> Option<Command> {
    let page = &mut app.quarterly;

    if is_left_event(event) {
        page.cursor_left();
        None
    } else if is_right_event(event) {
        page.cursor_right();
        None
    } else if is_activate_event(event) {
        page.select_cursor()
    } else if is_next_period_event(event) {
        page.next_quarter()
    } else if is_previous_period_event(event) {
        page.previous_quarter()
    } else if is_down_event(event) {
        page.view.row_down();
        None
    } else if is_up_event(event) {
        page.view.row_up();
        None
    } else {
        None
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::empty()))
    }

    fn press(app: &mut App, code: KeyCode) -> Option<Command> {
        handle_event(app, &key(code))
    }

    #[test]
    fn test_two_step_quit() {
        let mut app = App::new();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.is_running());
        assert!(app.is_awaiting_quit_confirmation());

        press(&mut app, KeyCode::Tab);
        assert!(!app.is_awaiting_quit_confirmation());

        press(&mut app, KeyCode::Char('q'));
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.is_running());
    }

    #[test]
    fn test_typing_q_while_editing_is_text() {
        let mut app = App::new();
        press(&mut app, KeyCode::Char('/'));
        let command = press(&mut app, KeyCode::Char('q'));
        assert_eq!(command, Some(Command::Suggest { query: "q".into() }));
        assert!(app.is_running());
        assert!(!app.is_awaiting_quit_confirmation());
    }

    #[test]
    fn test_search_flow() {
        let mut app = App::new();
        press(&mut app, KeyCode::Enter);
        assert!(app.is_editing());
        press(&mut app, KeyCode::Char('L'));
        press(&mut app, KeyCode::Char('G'));
        let command = press(&mut app, KeyCode::Enter);
        assert_eq!(command, Some(Command::Search { query: "LG".into() }));
        assert!(!app.is_editing());
    }

    #[test]
    fn test_page_shortcuts() {
        let mut app = App::new();
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.current_page, Page::QuarterlyRanking);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.current_page, Page::AnnualRanking);
    }

    #[test]
    fn test_annual_keys_toggle_per() {
        let mut app = App::with_page(Page::AnnualRanking);
        // PER est le 8e bouton
        for _ in 0..7 {
            press(&mut app, KeyCode::Right);
        }
        let first = press(&mut app, KeyCode::Enter).unwrap();
        assert_eq!(first.request().path, "top-per");
        let second = press(&mut app, KeyCode::Char(' ')).unwrap();
        assert_eq!(second.request().path, "bottom-per");

        let by_year = press(&mut app, KeyCode::Char('[')).unwrap();
        assert_eq!(by_year.request().param_value("year"), Some("2023"));
    }

    #[test]
    fn test_quarterly_keys() {
        let mut app = App::with_page(Page::QuarterlyRanking);
        assert_eq!(press(&mut app, KeyCode::Char(']')), None);

        let command = press(&mut app, KeyCode::Enter).unwrap();
        assert_eq!(command.request().param_value("metric"), Some("매출액"));
        let command = press(&mut app, KeyCode::Char(']')).unwrap();
        assert_eq!(command.request().param_value("quarter"), Some("2024-Q2"));
    }

    #[test]
    fn test_series_keys_need_a_stock() {
        let mut app = App::new();
        assert_eq!(press(&mut app, KeyCode::Char('y')), None);
        assert!(app.search.annual.error.is_some());
    }

    #[test]
    fn test_ctrl_c_quits_while_editing() {
        let mut app = App::new();
        press(&mut app, KeyCode::Char('/'));
        handle_event(
            &mut app,
            &Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        );
        assert!(!app.is_running());
    }
}
