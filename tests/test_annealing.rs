use searchlab::{
    annealing::{AnnealingProblem, SimulatedAnnealing, TileArrangement, TilingProblem, TourProblem},
    error::SearchError,
    rng::RandomNumberGenerator,
};

fn four_cities() -> TourProblem {
    TourProblem::new(vec![
        vec![0.0, 2.0, 9.0, 10.0],
        vec![2.0, 0.0, 6.0, 4.0],
        vec![9.0, 6.0, 0.0, 3.0],
        vec![10.0, 4.0, 3.0, 0.0],
    ])
    .unwrap()
}

/// Shortest closed tour by trying every ordering that starts at city 0.
fn exhaustive_optimum(problem: &TourProblem) -> f64 {
    let mut best = f64::INFINITY;
    for a in 1..4 {
        for b in 1..4 {
            for c in 1..4 {
                if a != b && b != c && a != c {
                    best = best.min(problem.tour_length(&[0, a, b, c]));
                }
            }
        }
    }
    best
}

/// Seam energy: how far each tile is from following its left and upper
/// neighbors in the solved order. Zero exactly for the identity.
fn seam_energy(arrangement: &TileArrangement) -> f64 {
    let (rows, cols) = (arrangement.rows(), arrangement.cols());
    let mut energy = 0.0;
    for row in 0..rows {
        for col in 0..cols {
            let tile = arrangement.tile_at(row, col) as f64;
            if col > 0 {
                energy += (tile - arrangement.tile_at(row, col - 1) as f64 - 1.0).abs();
            }
            if row > 0 {
                energy += (tile - arrangement.tile_at(row - 1, col) as f64 - cols as f64).abs();
            }
        }
    }
    energy
}

#[test]
fn test_tour_converges_to_exhaustive_optimum() {
    let problem = four_cities();
    let optimum = exhaustive_optimum(&problem);
    assert_eq!(optimum, 18.0);

    let mut rng = RandomNumberGenerator::from_seed(2718);
    for min_temperature in [1.0, 0.1, 0.01, 0.001] {
        let annealer = SimulatedAnnealing::new(10.0, 0.99, min_temperature).unwrap();
        let start = problem.random_tour(&mut rng);
        let result = annealer.run_repeated(&problem, start, 3, &mut rng).unwrap();

        assert!(
            (result.best_cost - optimum).abs() < 1e-9,
            "min temperature {} ended at {}",
            min_temperature,
            result.best_cost
        );
        assert!((problem.tour_length(&result.best) - result.best_cost).abs() < 1e-9);
        assert!(result.final_temperature <= min_temperature);
    }
}

#[test]
fn test_lower_min_temperature_runs_longer() {
    let problem = four_cities();
    let start = vec![0, 2, 1, 3];
    let mut iterations = Vec::new();
    for min_temperature in [1.0, 0.1, 0.01] {
        let annealer = SimulatedAnnealing::new(10.0, 0.9, min_temperature).unwrap();
        let result = annealer
            .run(&problem, start.clone(), &mut RandomNumberGenerator::from_seed(1))
            .unwrap();
        iterations.push(result.iterations);
    }
    assert!(iterations.windows(2).all(|w| w[0] < w[1]), "{:?}", iterations);
}

#[test]
fn test_tiling_energy_goes_down() {
    let problem = TilingProblem::new(3, 3, seam_energy).unwrap();
    assert_eq!(problem.cost(&TileArrangement::identity(3, 3)), 0.0);

    let mut rng = RandomNumberGenerator::from_seed(64);
    let start = problem.shuffled(&mut rng);
    let start_energy = problem.cost(&start);
    assert!(start_energy > 0.0);

    let annealer = SimulatedAnnealing::new(5.0, 0.995, 0.01).unwrap();
    let result = annealer.run_repeated(&problem, start, 4, &mut rng).unwrap();

    assert!(result.best_cost < start_energy);
    assert_eq!(result.best_cost, seam_energy(&result.best));
    let mut tiles = result.best.tiles().to_vec();
    tiles.sort_unstable();
    assert_eq!(tiles, (0..9).collect::<Vec<_>>());
}

#[test]
fn test_same_seed_same_anneal() {
    let problem = four_cities();
    let annealer = SimulatedAnnealing::new(10.0, 0.98, 0.01).unwrap();

    let a = annealer
        .run(&problem, vec![0, 1, 2, 3], &mut RandomNumberGenerator::from_seed(9))
        .unwrap();
    let b = annealer
        .run(&problem, vec![0, 1, 2, 3], &mut RandomNumberGenerator::from_seed(9))
        .unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_non_finite_energy_is_an_error() {
    let problem = TilingProblem::new(2, 2, |_: &TileArrangement| f64::INFINITY).unwrap();
    let annealer = SimulatedAnnealing::new(1.0, 0.5, 0.1).unwrap();
    let result = annealer.run(
        &problem,
        TileArrangement::identity(2, 2),
        &mut RandomNumberGenerator::from_seed(0),
    );
    assert!(matches!(result, Err(SearchError::InvalidNumericValue(_))));
}

#[test]
fn test_invalid_schedules_are_rejected() {
    for (t0, alpha, t_min) in [(0.0, 0.9, 0.1), (1.0, 1.0, 0.1), (1.0, 0.0, 0.1), (1.0, 0.9, 2.0)] {
        assert!(matches!(
            SimulatedAnnealing::new(t0, alpha, t_min),
            Err(SearchError::Configuration(_))
        ));
    }
    let annealer = SimulatedAnnealing::new(1.0, 0.9, 0.1).unwrap();
    assert!(annealer.clone().with_max_iterations(0).is_err());
    assert!(annealer
        .run_repeated(&four_cities(), vec![0, 1, 2, 3], 0, &mut RandomNumberGenerator::from_seed(0))
        .is_err());
}

#[test]
fn test_out_of_range_city_is_malformed() {
    let problem = TourProblem::new(vec![vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap();
    let annealer = SimulatedAnnealing::new(1.0, 0.5, 0.1).unwrap();
    let result = annealer.run(&problem, vec![0, 5], &mut RandomNumberGenerator::from_seed(0));
    assert!(matches!(result, Err(SearchError::MalformedInput(_))));
}
