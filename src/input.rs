use crate::actions::ActionKind;
use crate::model::Scene;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use std::time::Duration;

#[derive(Clone, Debug)]
pub(crate) struct InputEvent {
    pub(crate) key: KeyCode,
    pub(crate) mods: KeyModifiers,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Quit,
    HelpToggle,
    Back,
    TriggerAction(ActionKind),
    CycleMood,
    NextMonster,
    PrevMonster,
    ToggleColor,
    AdoptOpen,
    Reroll,
    PreviewMood(i32),
    NameChar(char),
    NameBackspace,
    AdoptCommit,
    AdoptCancel,
}

pub(crate) fn collect_input_nonblocking(max_frame_time: Duration) -> anyhow::Result<Vec<InputEvent>> {
    let mut out = Vec::new();

    // poll with a tiny timeout so we stay responsive
    let timeout = std::cmp::min(Duration::from_millis(1), max_frame_time);
    while event::poll(timeout)? {
        if let Event::Key(k) = event::read()? {
            if k.kind == KeyEventKind::Press || k.kind == KeyEventKind::Repeat {
                out.push(InputEvent {
                    key: k.code,
                    mods: k.modifiers,
                });
                if out.len() >= 32 {
                    break;
                }
            }
        }
    }
    Ok(out)
}

pub(crate) fn map_event_to_command(scene: Scene, ev: InputEvent) -> Option<Command> {
    if scene == Scene::Adopt {
        return match ev.key {
            KeyCode::Enter => Some(Command::AdoptCommit),
            KeyCode::Esc => Some(Command::AdoptCancel),
            KeyCode::Backspace => Some(Command::NameBackspace),
            KeyCode::Tab => Some(Command::Reroll),
            KeyCode::Up => Some(Command::PreviewMood(-1)),
            KeyCode::Down => Some(Command::PreviewMood(1)),
            KeyCode::Char(ch) => {
                if ev.mods.contains(KeyModifiers::CONTROL) {
                    None
                } else if (ch.is_ascii() && !ch.is_ascii_control()) || ch == ' ' {
                    Some(Command::NameChar(ch))
                } else {
                    None
                }
            }
            _ => None,
        };
    }

    match ev.key {
        KeyCode::Char('h') | KeyCode::Char('H') => return Some(Command::HelpToggle),
        KeyCode::Char('q') | KeyCode::Char('Q') => return Some(Command::Quit),
        KeyCode::Esc => return Some(Command::Back),
        _ => {}
    }

    match scene {
        Scene::Main => match ev.key {
            KeyCode::Char('f') | KeyCode::Char('F') => Some(Command::TriggerAction(ActionKind::Feed)),
            KeyCode::Char('c') | KeyCode::Char('C') => {
                Some(Command::TriggerAction(ActionKind::Comfort))
            }
            KeyCode::Char('u') | KeyCode::Char('U') => {
                Some(Command::TriggerAction(ActionKind::Cuddle))
            }
            KeyCode::Char('w') | KeyCode::Char('W') => Some(Command::TriggerAction(ActionKind::Wake)),
            KeyCode::Char('m') | KeyCode::Char('M') => Some(Command::CycleMood),
            KeyCode::Char('n') | KeyCode::Char('N') => Some(Command::AdoptOpen),
            KeyCode::Char('v') | KeyCode::Char('V') => Some(Command::ToggleColor),
            KeyCode::Left => Some(Command::PrevMonster),
            KeyCode::Right => Some(Command::NextMonster),
            _ => None,
        },
        Scene::Help => None,
        Scene::Adopt => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(key: KeyCode) -> InputEvent {
        InputEvent {
            key,
            mods: KeyModifiers::NONE,
        }
    }

    #[test]
    fn main_scene_maps_action_keys() {
        assert_eq!(
            map_event_to_command(Scene::Main, ev(KeyCode::Char('f'))),
            Some(Command::TriggerAction(ActionKind::Feed))
        );
        assert_eq!(
            map_event_to_command(Scene::Main, ev(KeyCode::Char('W'))),
            Some(Command::TriggerAction(ActionKind::Wake))
        );
        assert_eq!(map_event_to_command(Scene::Main, ev(KeyCode::Char('x'))), None);
    }

    #[test]
    fn adopt_scene_captures_typing() {
        assert_eq!(
            map_event_to_command(Scene::Adopt, ev(KeyCode::Char('f'))),
            Some(Command::NameChar('f'))
        );
        assert_eq!(
            map_event_to_command(Scene::Adopt, ev(KeyCode::Enter)),
            Some(Command::AdoptCommit)
        );
        assert_eq!(
            map_event_to_command(Scene::Adopt, ev(KeyCode::Tab)),
            Some(Command::Reroll)
        );
    }
}
