use bevy::prelude::*;
use bloom_helpers::ArtistProfile;

/// Which artist the player defends this session. Set by the shell on
/// selection-confirm and cleared when the player navigates back, never
/// read from anywhere else.
#[derive(Resource, Default, Debug, Clone)]
pub struct ArtistSession {
    pub artist: Option<ArtistProfile>,
}

impl ArtistSession {
    pub fn real_artist_label(&self) -> &str {
        self.artist
            .as_ref()
            .map_or("your artist", |artist| artist.name.as_str())
    }

    /// The impostor is always named after the selected artist.
    pub fn fake_artist_label(&self) -> String {
        self.artist.as_ref().map_or_else(
            || "Catfish".to_string(),
            |artist| format!("Catfish {}", artist.name),
        )
    }

    pub const fn is_ready(&self) -> bool {
        self.artist.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with(name: &str) -> ArtistSession {
        ArtistSession {
            artist: Some(ArtistProfile {
                name: name.to_string(),
                image_url: String::new(),
            }),
        }
    }

    #[test]
    fn fake_label_derives_from_selected_artist() {
        assert_eq!(
            session_with("Mitski").fake_artist_label(),
            "Catfish Mitski"
        );
    }

    #[test]
    fn missing_artist_falls_back_to_placeholder_labels() {
        let session = ArtistSession::default();
        assert!(!session.is_ready(), "no artist means the game cannot start");
        assert_eq!(session.fake_artist_label(), "Catfish");
        assert_eq!(session.real_artist_label(), "your artist");
    }
}
