use std::sync::{Arc, LazyLock};

use bevy::prelude::*;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
#[cfg(target_arch = "wasm32")]
use web_sys::MessageEvent;

/// Artist picked in the Bloom shell. Rounds are framed as a duel against
/// an impostor of this artist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistProfile {
    pub name: String,
    pub image_url: String,
}

/// Final tally of a session, reported to the shell when a round ends
/// without being extended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionResult {
    /// The player collected more flowers than the impostor.
    Victory { flowers: u64, impostor: u64 },
    /// The impostor matched or beat the player's count.
    ImpostorWin { flowers: u64, impostor: u64 },
    /// Three catfish caught, the impostor captured the round.
    ImpostorCapture { flowers: u64, impostor: u64 },
    /// Session was torn down before any round finished.
    Aborted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameDuration {
    seconds: u32,
}

impl GameDuration {
    pub const fn from_secs(seconds: u32) -> Self {
        Self { seconds }
    }

    /// The game manages its own clock, the shell does not cut it off.
    pub const fn max_duration() -> Self {
        Self { seconds: u32::MAX }
    }

    pub const fn seconds(self) -> u32 {
        self.seconds
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameParameters {
    pub duration: GameDuration,
}

/// Messages sent by the Bloom shell to the game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShellMessage {
    Start,
    Restart,
    End,
    Parameters,
    SelectArtist(ArtistProfile),
    ClearArtist,
}

/// Messages sent by the game back to the Bloom shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameMessage {
    Ready,
    End(SessionResult),
    Parameters(GameParameters),
}

pub static SHELL_MESSAGE_QUEUE: LazyLock<Arc<Mutex<Vec<ShellMessage>>>> =
    LazyLock::new(|| Arc::new(Mutex::new(Vec::new())));

#[cfg(not(target_arch = "wasm32"))]
pub static GAME_MESSAGE_QUEUE: LazyLock<Arc<Mutex<Vec<GameMessage>>>> =
    LazyLock::new(|| Arc::new(Mutex::new(Vec::new())));

#[cfg(target_arch = "wasm32")]
pub fn listen_shell_messages() {
    let window = web_sys::window().expect("no global `window` exists");
    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        let message: Result<ShellMessage, serde_wasm_bindgen::Error> =
            serde_wasm_bindgen::from_value(event.data());

        let Ok(message) = message else {
            error!("Could not parse shell message {:?}", &event.data());
            return;
        };

        SHELL_MESSAGE_QUEUE.lock().push(message);
    }) as Box<dyn FnMut(MessageEvent)>);

    window
        .add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
        .expect("failed to add message event listener");

    closure.forget(); // Leaks memory, but ensures the closure lives for the lifetime of the program
}

#[cfg(not(target_arch = "wasm32"))]
pub fn send_game_message(message: GameMessage) {
    GAME_MESSAGE_QUEUE.lock().push(message);
}

#[cfg(target_arch = "wasm32")]
pub fn send_game_message(message: GameMessage) {
    let window = web_sys::window().expect("no global `window` exists");
    let Ok(message_str) = serde_wasm_bindgen::to_value(&message) else {
        error!("Could not serialize {message:?}");
        return;
    };

    let Ok(Some(parent_window)) = window.parent() else {
        error!("{message:?} not sent, parent_window not found.");
        return;
    };

    if let Err(err) = parent_window.post_message(&message_str, "*") {
        error!("Could not post message {message_str:?}. {err:?}");
    };
}

/// This trait implements the messages that can be called by the Bloom shell.
///
/// The functions need to be implemented for the good functioning of the platform.
/// Those functions are not meant to be called directly from the game itself.
pub trait ShellMessageHandler: Send + Sync + Default + 'static {
    fn duration(world: &mut World) -> GameDuration;
    fn end(world: &mut World) -> SessionResult;
    fn restart(world: &mut World);
    fn select_artist(world: &mut World, artist: ArtistProfile);
    fn clear_artist(world: &mut World);
}

fn process_shell_messages<T: ShellMessageHandler>(world: &mut World) {
    let messages = SHELL_MESSAGE_QUEUE.lock().drain(..).collect::<Vec<_>>();

    for message in messages {
        match message {
            ShellMessage::End => {
                let result = T::end(world);
                send_game_message(GameMessage::End(result));
            }
            ShellMessage::Parameters => {
                let duration = T::duration(world);
                let parameters = GameParameters { duration };
                send_game_message(GameMessage::Parameters(parameters));
            }
            ShellMessage::Restart => T::restart(world),
            ShellMessage::SelectArtist(artist) => T::select_artist(world, artist),
            ShellMessage::ClearArtist => T::clear_artist(world),
            ShellMessage::Start => {
                // The shell only sends Start after Ready, nothing to do here.
            }
        }
    }
}

fn ready() {
    send_game_message(GameMessage::Ready);
}

#[derive(Default)]
pub struct ShellPlugin<T: ShellMessageHandler>(core::marker::PhantomData<T>);

impl<T: ShellMessageHandler> Plugin for ShellPlugin<T> {
    fn build(&self, app: &mut App) {
        app.add_systems(PostUpdate, process_shell_messages::<T>);
        #[cfg(target_arch = "wasm32")]
        {
            app.add_systems(Startup, listen_shell_messages);
        }
        app.add_systems(PostStartup, ready);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_result_roundtrips_through_json() {
        let result = SessionResult::Victory {
            flowers: 12,
            impostor: 4,
        };
        let json = serde_json::to_string(&result).unwrap();
        let back: SessionResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, back, "serialized result should survive a roundtrip");
    }

    #[test]
    fn artist_profile_uses_camel_case_keys() {
        let artist = ArtistProfile {
            name: "Mitski".to_string(),
            image_url: "https://example.com/mitski.jpg".to_string(),
        };
        let json = serde_json::to_string(&artist).unwrap();
        assert!(json.contains("imageUrl"), "shell speaks camelCase: {json}");
    }
}
