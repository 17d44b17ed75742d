use crate::keybinds::Action;
use arcade_core::grid::Direction;
use gilrs::{Axis, Button, EventType, Gilrs};
use log::{info, warn};

// Stick deflection needed before it counts as a D-pad press.
const STICK_THRESHOLD: f32 = 0.6;

/// Polls connected controllers and turns them into launcher actions.
pub struct Gamepads {
    gilrs: Gilrs,
    // Last direction reported per stick axis, so a held stick fires once.
    stick_x: Option<Direction>,
    stick_y: Option<Direction>,
}

impl Gamepads {
    pub fn new() -> Option<Self> {
        match Gilrs::new() {
            Ok(gilrs) => {
                for (_, pad) in gilrs.gamepads() {
                    info!("Gamepad connected: {}", pad.name());
                }
                Some(Self {
                    gilrs,
                    stick_x: None,
                    stick_y: None,
                })
            }
            Err(e) => {
                warn!("Gamepad support unavailable: {e}");
                None
            }
        }
    }

    /// Whether any controller is plugged in. Connections are noticed on the
    /// next [`poll`](Self::poll).
    pub fn any_connected(&self) -> bool {
        self.gilrs.gamepads().next().is_some()
    }

    /// Drain pending controller events.
    pub fn poll(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        while let Some(gilrs::Event { event, .. }) = self.gilrs.next_event() {
            match event {
                EventType::ButtonPressed(button, _) => {
                    if let Some(action) = button_action(button) {
                        actions.push(action);
                    }
                }
                EventType::AxisChanged(Axis::LeftStickX, value, _) => {
                    let dir = stick_direction(value, Direction::Left, Direction::Right);
                    if dir.is_some() && dir != self.stick_x {
                        actions.extend(dir.map(Action::Move));
                    }
                    self.stick_x = dir;
                }
                EventType::AxisChanged(Axis::LeftStickY, value, _) => {
                    // gilrs reports up as positive.
                    let dir = stick_direction(value, Direction::Down, Direction::Up);
                    if dir.is_some() && dir != self.stick_y {
                        actions.extend(dir.map(Action::Move));
                    }
                    self.stick_y = dir;
                }
                EventType::Connected => info!("Gamepad connected"),
                EventType::Disconnected => info!("Gamepad disconnected"),
                _ => {}
            }
        }
        actions
    }
}

fn button_action(button: Button) -> Option<Action> {
    match button {
        Button::DPadUp => Some(Action::Move(Direction::Up)),
        Button::DPadDown => Some(Action::Move(Direction::Down)),
        Button::DPadLeft => Some(Action::Move(Direction::Left)),
        Button::DPadRight => Some(Action::Move(Direction::Right)),
        Button::South | Button::Start => Some(Action::Launch),
        _ => None,
    }
}

fn stick_direction(value: f32, negative: Direction, positive: Direction) -> Option<Direction> {
    if value <= -STICK_THRESHOLD {
        Some(negative)
    } else if value >= STICK_THRESHOLD {
        Some(positive)
    } else {
        None
    }
}
