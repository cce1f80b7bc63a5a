use bevy::prelude::*;
use bloom_helpers::{FONT, GameMessage, send_game_message};

use crate::core::GameState;
use crate::core::config::CATFISH_LIMIT;
use crate::rounds::{
    EndCause, RoundOutcome, RoundReport, RoundSession, RoundTimer, apply_extension, session_result,
};
use crate::scoring::ScoreLedger;
use crate::session::ArtistSession;

#[derive(Component)]
pub struct RoundOverElement;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOverAction {
    GoHome,
    Extend,
    Restart,
}

fn headline(outcome: RoundOutcome, session: &ArtistSession) -> String {
    match outcome {
        RoundOutcome::Victory => format!("{} wins!", session.real_artist_label()),
        RoundOutcome::ImpostorWin => format!("{} wins!", session.fake_artist_label()),
        RoundOutcome::ImpostorCapture => "Caught by the catfish!".to_string(),
    }
}

pub fn spawn_round_over_screen(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    report: Res<RoundReport>,
    cause: Res<EndCause>,
    session: Res<ArtistSession>,
) {
    let font = asset_server.load(FONT);

    let breakdown = format!(
        "{}: {} flowers\n{}: {} flowers\nCatfish caught: {}/{CATFISH_LIMIT}\nRound {}",
        session.real_artist_label(),
        report.flowers_to_real_artist,
        session.fake_artist_label(),
        report.flowers_to_impostor,
        report.catfish_caught,
        report.round_number,
    );

    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
        RoundOverElement,
    ));

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                ..default()
            },
            RoundOverElement,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(headline(report.outcome, &session)),
                TextFont {
                    font: font.clone(),
                    font_size: 36.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                TextLayout::new_with_justify(JustifyText::Center),
            ));

            parent
                .spawn((
                    Node {
                        padding: UiRect::all(Val::Px(20.0)),
                        max_width: Val::Percent(80.0),
                        margin: UiRect::all(Val::Px(10.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.1, 0.1, 0.1, 0.8)),
                ))
                .with_children(|parent| {
                    parent.spawn((
                        Text::new(breakdown),
                        TextFont {
                            font: font.clone(),
                            font_size: 20.0,
                            ..default()
                        },
                        TextColor(Color::WHITE),
                        TextLayout::new_with_justify(JustifyText::Center),
                    ));
                });

            let mut buttons = vec![(RoundOverAction::GoHome, "Back to Bloom".to_string())];
            if report.extensions_remaining > 0 {
                let label = if *cause == EndCause::CatfishLimit {
                    "Extend +30s (keeps 1 catfish)".to_string()
                } else {
                    "Extend +30s".to_string()
                };
                buttons.push((RoundOverAction::Extend, label));
            }
            buttons.push((RoundOverAction::Restart, "Restart".to_string()));

            for (action, label) in buttons {
                parent
                    .spawn((
                        Node {
                            width: Val::Px(240.0),
                            height: Val::Px(50.0),
                            margin: UiRect::all(Val::Px(8.0)),
                            justify_content: JustifyContent::Center,
                            align_items: AlignItems::Center,
                            ..default()
                        },
                        BackgroundColor(Color::BLACK),
                        Button,
                        action,
                    ))
                    .with_children(|parent| {
                        parent.spawn((
                            Text::new(label),
                            TextFont {
                                font: font.clone(),
                                font_size: 22.0,
                                ..default()
                            },
                            TextColor(Color::WHITE),
                        ));
                    });
            }
        });
}

pub fn handle_round_over_buttons(
    mut interaction_query: Query<
        (&Interaction, &RoundOverAction),
        (Changed<Interaction>, With<Button>),
    >,
    mut ledger: ResMut<ScoreLedger>,
    mut timer: ResMut<RoundTimer>,
    mut session: ResMut<RoundSession>,
    cause: Res<EndCause>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for (interaction, action) in &mut interaction_query {
        if *interaction != Interaction::Pressed {
            continue;
        }

        match action {
            RoundOverAction::GoHome => {
                send_game_message(GameMessage::End(session_result(&ledger)));
                next_state.set(GameState::Terminated);
            }
            RoundOverAction::Extend => {
                if session.can_extend() {
                    session.extensions_used += 1;
                    session.round_number += 1;
                    apply_extension(&mut ledger, *cause);
                    timer.reset();
                    next_state.set(GameState::Playing);
                }
            }
            RoundOverAction::Restart => {
                *ledger = ScoreLedger::default();
                *session = RoundSession::default();
                timer.reset();
                next_state.set(GameState::Playing);
            }
        }
    }
}

pub fn cleanup_round_over(mut commands: Commands, query: Query<Entity, With<RoundOverElement>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
    commands.remove_resource::<RoundReport>();
    commands.remove_resource::<EndCause>();
}

#[cfg(test)]
mod tests {
    use bloom_helpers::ArtistProfile;

    use super::*;

    #[test]
    fn headline_names_the_winner() {
        let session = ArtistSession {
            artist: Some(ArtistProfile {
                name: "Mitski".to_string(),
                image_url: String::new(),
            }),
        };
        assert_eq!(headline(RoundOutcome::Victory, &session), "Mitski wins!");
        assert_eq!(
            headline(RoundOutcome::ImpostorWin, &session),
            "Catfish Mitski wins!"
        );
    }
}
