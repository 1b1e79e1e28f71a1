use queue_dataset::io::reporting::write_results;
use queue_dataset::{
    simulate, BatchConfig, BatchRunner, ExponentialVariates, ParameterSampler, QueueSimulation,
    SimulationParameters, SimulationResult, UniformParameterSampler,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

const SEEDS: [u64; 5] = [1, 7, 42, 1234, 98765];

fn run(params: SimulationParameters, seed: u64) -> SimulationResult {
    let variates = ExponentialVariates::new(&params, Some(seed)).unwrap();
    simulate(params, variates).unwrap()
}

#[test]
fn every_arrival_is_served_rejected_or_in_flight() {
    let sampler = UniformParameterSampler::default();

    for seed in SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let params = sampler.sample(&mut rng).with_simulation_time(200.0);
        let variates = ExponentialVariates::new(&params, Some(seed)).unwrap();

        let mut sim = QueueSimulation::new(params, variates).unwrap();
        sim.run_to_horizon().unwrap();
        let result = sim.summarize();

        assert_eq!(
            result.customers_served + result.customers_rejected + sim.in_flight() as u64,
            sim.arrivals(),
            "conservation failed for {:?}",
            params
        );
        // One occupancy sample per arrival.
        assert_eq!(sim.metrics().queue_lengths().len() as u64, sim.arrivals());
        // No more in flight than servers plus wait line.
        assert!(sim.in_flight() <= params.num_servers + params.queue_capacity);
    }
}

#[test]
fn rates_and_percentages_are_bounded() {
    let sampler = UniformParameterSampler::default();
    let mut rng = StdRng::seed_from_u64(31337);

    for _ in 0..20 {
        let params = sampler.sample(&mut rng).with_simulation_time(200.0);
        let result = run(params, 5);

        assert!((0.0..=1.0).contains(&result.rejection_rate));
        assert!((0.0..=100.0).contains(&result.utilization), "{:?}", result);
        assert!((0.0..=100.0).contains(&result.service_level));
        assert!(result.max_wait_time >= result.avg_wait_time);
        assert!(result.max_queue_length <= params.num_servers + params.queue_capacity);
    }
}

#[test]
fn huge_capacity_means_no_rejections() {
    let params = SimulationParameters::new(8.0, 10.0, 1, 1_000_000).with_simulation_time(500.0);
    for seed in SEEDS {
        let result = run(params, seed);
        assert_eq!(result.customers_rejected, 0);
        assert_eq!(result.rejection_rate, 0.0);
    }
}

#[test]
fn nobody_served_means_zero_wait_and_service_level() {
    // The first service never finishes within the horizon.
    let params = SimulationParameters::new(10.0, 1e-9, 1, 5).with_simulation_time(10.0);
    let result = run(params, 3);

    assert_eq!(result.customers_served, 0);
    assert_eq!(result.avg_wait_time, 0.0);
    assert_eq!(result.service_level, 0.0);
    assert_eq!(result.utilization, 0.0);
    assert!(result.customers_rejected > 0);
}

#[test]
fn more_room_never_means_more_rejections_on_average() {
    let mean_rejection = |capacity: usize| {
        let params =
            SimulationParameters::new(7.0, 4.0, 2, capacity).with_simulation_time(500.0);
        SEEDS
            .iter()
            .map(|seed| run(params, *seed).rejection_rate)
            .sum::<f64>()
            / SEEDS.len() as f64
    };

    let rates: Vec<f64> = [0, 5, 20, 50].into_iter().map(mean_rejection).collect();
    for pair in rates.windows(2) {
        assert!(
            pair[1] <= pair[0],
            "rejection rate rose with capacity: {:?}",
            rates
        );
    }
}

#[test]
fn same_seed_gives_byte_identical_rows() {
    let params = SimulationParameters::new(9.5, 3.2, 4, 15).with_simulation_time(400.0);

    let a = run(params, 2024);
    let b = run(params, 2024);
    assert_eq!(a, b);

    let mut csv_a = Vec::new();
    let mut csv_b = Vec::new();
    write_results(&mut csv_a, &[a]).unwrap();
    write_results(&mut csv_b, &[b]).unwrap();
    assert_eq!(csv_a, csv_b);
}

#[test]
fn zero_capacity_single_server_rejects_every_arrival() {
    let params = SimulationParameters::new(5.0, 10.0, 1, 0).with_simulation_time(100.0);

    for seed in SEEDS {
        let result = run(params, seed);
        assert!(result.customers_rejected > 0);
        assert_eq!(result.customers_served, 0);
        assert_eq!(result.rejection_rate, 1.0);
        assert_eq!(result.max_wait_time, 0.0);
        assert_eq!(result.service_level, 0.0);
        assert_eq!(result.avg_queue_length, 0.0);
    }
}

#[test]
fn queue_length_samples_exclude_the_new_arrival() {
    // Lightly loaded: most arrivals find the system empty.
    let params = SimulationParameters::new(0.5, 20.0, 1, 10).with_simulation_time(500.0);
    let variates = ExponentialVariates::new(&params, Some(12)).unwrap();

    let mut sim = QueueSimulation::new(params, variates).unwrap();
    sim.run_to_horizon().unwrap();

    let samples = sim.metrics().queue_lengths();
    assert!(!samples.is_empty());
    assert!(samples.iter().filter(|q| **q == 0).count() > samples.len() / 2);
}

#[test]
fn many_servers_light_load() {
    let params = SimulationParameters::new(5.0, 2.0, 100, 5).with_simulation_time(1000.0);
    let expected = params.arrival_rate / params.service_rate / params.num_servers as f64 * 100.0;

    for seed in SEEDS {
        let result = run(params, seed);
        assert_eq!(result.customers_rejected, 0);
        assert_eq!(result.max_wait_time, 0.0);
        assert!(
            (result.utilization - expected).abs() < expected * 0.1,
            "utilization {:.3} vs expected {:.3}",
            result.utilization,
            expected
        );
    }
}

#[test]
fn zero_horizon_is_an_empty_result() {
    let params = SimulationParameters::new(5.0, 10.0, 1, 5).with_simulation_time(0.0);
    let result = run(params, 1);

    assert_eq!(result.customers_served, 0);
    assert_eq!(result.customers_rejected, 0);
    assert_eq!(result.avg_wait_time, 0.0);
    assert_eq!(result.max_wait_time, 0.0);
    assert_eq!(result.std_wait_time, 0.0);
    assert_eq!(result.avg_queue_length, 0.0);
    assert_eq!(result.max_queue_length, 0);
    assert_eq!(result.avg_service_time, 0.0);
    assert_eq!(result.rejection_rate, 0.0);
    assert_eq!(result.throughput, 0.0);
    assert_eq!(result.utilization, 0.0);
    assert_eq!(result.service_level, 0.0);
}

#[test]
fn throughput_tracks_arrival_rate_when_stable() {
    let params = SimulationParameters::new(4.0, 3.0, 3, 50).with_simulation_time(2000.0);
    let result = run(params, 77);

    assert!((result.throughput - params.arrival_rate).abs() < params.arrival_rate * 0.05);
    assert!((result.avg_service_time - 1.0 / params.service_rate).abs() < 0.05);
}

#[test]
fn batch_dataset_is_reproducible() {
    let config = BatchConfig {
        trials: 8,
        seed: Some(99),
        parallel: true,
        progress_every: 0,
    };
    let a = BatchRunner::new(UniformParameterSampler::default(), config.clone())
        .run()
        .unwrap();
    let b = BatchRunner::new(UniformParameterSampler::default(), config)
        .run()
        .unwrap();

    assert_eq!(a.len(), 8);
    assert_eq!(a, b);
    for row in &a {
        assert_eq!(row.simulation_time, 1000.0);
        assert!(row.parameters().validate().is_ok());
    }
}
