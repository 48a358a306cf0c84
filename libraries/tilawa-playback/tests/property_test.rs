//! Property-based tests for the playlist controller
//!
//! Random transport sequences, including natural completions, must never
//! leave the controller pointing outside its playlist or leave more than one
//! resource rendering.

mod common;

use common::{verses, FakeRenderer};
use proptest::prelude::*;
use tilawa_playback::{PlaybackPhase, PlaylistController};

#[derive(Debug, Clone)]
enum Op {
    SetPlaylist(usize),
    Play(usize),
    Stop,
    Pause,
    Next,
    Previous,
    Rate(f32),
    Finish,
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        1 => (0usize..6).prop_map(Op::SetPlaylist),
        3 => (0usize..8).prop_map(Op::Play),
        1 => Just(Op::Stop),
        1 => Just(Op::Pause),
        2 => Just(Op::Next),
        2 => Just(Op::Previous),
        1 => (0.25f32..3.0).prop_map(Op::Rate),
        3 => Just(Op::Finish),
    ]
}

async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: index stays valid and at most one resource renders
    #[test]
    fn transport_preserves_invariants(
        initial in 0usize..6,
        ops in prop::collection::vec(arbitrary_op(), 1..40)
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        runtime.block_on(async {
            let renderer = FakeRenderer::new();
            let controller = PlaylistController::new(renderer.clone());
            controller.set_playlist(verses(initial)).await;
            let mut len = initial;

            for op in ops {
                match op {
                    Op::SetPlaylist(n) => {
                        controller.set_playlist(verses(n)).await;
                        len = n;
                    }
                    Op::Play(index) => {
                        let result = controller.play(index).await;
                        if index >= len {
                            prop_assert!(result.is_err());
                        } else {
                            prop_assert!(result.is_ok());
                        }
                    }
                    Op::Stop => controller.stop().await,
                    Op::Pause => controller.pause().await,
                    Op::Next => prop_assert!(controller.play_next().await.is_ok()),
                    Op::Previous => prop_assert!(controller.play_previous().await.is_ok()),
                    Op::Rate(rate) => prop_assert!(controller.set_playback_rate(rate).await.is_ok()),
                    Op::Finish => renderer.finish_current(),
                }
                settle().await;

                let state = controller.state();
                if let Some(index) = state.current_index {
                    prop_assert!(index < len, "index {} outside playlist of {}", index, len);
                } else {
                    prop_assert!(!state.is_playing);
                }
                prop_assert_eq!(state.is_playing, state.phase == PlaybackPhase::Playing);
                prop_assert!(renderer.playing().len() <= 1);
                prop_assert!(state.playback_rate > 0.0);
            }
            Ok(())
        })?;
    }

    /// Property: toggling the same track twice always ends idle
    #[test]
    fn double_play_is_stop(len in 1usize..10, pick in 0usize..10) {
        let index = pick % len;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        runtime.block_on(async {
            let renderer = FakeRenderer::new();
            let controller = PlaylistController::new(renderer.clone());
            controller.set_playlist(verses(len)).await;

            controller.play(index).await.unwrap();
            controller.play(index).await.unwrap();

            prop_assert_eq!(controller.state().phase, PlaybackPhase::Idle);
            prop_assert!(renderer.playing().is_empty());
            Ok(())
        })?;
    }
}
