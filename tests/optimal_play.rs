//! Convergence checks against known Nim theory
//!
//! Single-pile Nim with a per-turn cap of 3 is lost for the mover exactly
//! when the stick count is a multiple of 4; the winning response always
//! leaves a multiple of 4. Multi-pile Nim is lost for the mover exactly when
//! the XOR of pile sizes is zero.

use nimq::{GameState, PileInit, QLearningAgent, Rules, TrainingConfig, TrainingPipeline};

fn train(config: TrainingConfig, learning_rate: f64, epsilon: f64) -> QLearningAgent {
    let mut agent = QLearningAgent::new(learning_rate, 0.9, epsilon);
    let mut pipeline = TrainingPipeline::new(config);
    pipeline.run(&mut agent).expect("training should succeed");
    agent
}

#[test]
fn single_pile_agent_leaves_multiples_of_four() {
    let rules = Rules::new(3);
    // A small learning rate matters here: the ±1 episode rewards are noisy,
    // and with a large α the residual Q-value noise swamps the ~0.1 gap
    // between the optimal and second-best move. Randomized starts keep every
    // stick count visited often enough to converge.
    let config = TrainingConfig {
        episodes: 200_000,
        start: PileInit::Random {
            num_piles: 1,
            max_stones: 10,
        },
        rules,
        seed: Some(7),
    };
    let agent = train(config, 0.01, 0.5);

    // From every reachable losing-for-opponent stick count, exploitation
    // must take (sticks mod 4), leaving a multiple of 4.
    for sticks in 1..=10u32 {
        if sticks % 4 == 0 {
            continue; // mover cannot force a win here
        }
        let state = GameState::new(vec![sticks]);
        let action = agent
            .best_move(&rules, &state)
            .expect("non-terminal state has moves");
        assert_eq!(
            action.take,
            sticks % 4,
            "from {sticks} sticks the winning move takes {} (got {})",
            sticks % 4,
            action.take
        );
    }
}

#[test]
fn multi_pile_agent_moves_to_xor_zero() {
    let rules = Rules::new(3);
    let config = TrainingConfig {
        episodes: 20_000,
        start: PileInit::Random {
            num_piles: 3,
            max_stones: 2,
        },
        rules,
        seed: Some(11),
    };
    let agent = train(config, 0.2, 0.4);

    // [1,1,1]: the winning move empties one pile, leaving an even number of
    // size-1 piles (XOR zero).
    let state = GameState::new(vec![1, 1, 1]);
    let action = agent.best_move(&rules, &state).unwrap();
    let next = rules.apply(&state, action).unwrap();
    assert_eq!(next.xor_sum(), 0, "expected a move to XOR-zero, got {next}");
    assert_eq!(action.take, 1);

    // [2,2,1]: the only move to XOR zero removes the lone stone.
    let state = GameState::new(vec![2, 2, 1]);
    let action = agent.best_move(&rules, &state).unwrap();
    let next = rules.apply(&state, action).unwrap();
    assert_eq!(next.xor_sum(), 0, "expected a move to XOR-zero, got {next}");
}
