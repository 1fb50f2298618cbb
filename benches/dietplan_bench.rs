//! Criterion benchmarks for meal-plan evaluation and full runs.
//!
//! Catalogs are synthetic and seeded, so timings are comparable across runs.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use u_dietplan::catalog::{FoodCatalog, Nutrients, SyntheticCatalog};
use u_dietplan::fitness::Goal;
use u_dietplan::ga::{EvolutionConfig, GaProblem};
use u_dietplan::plan::SlotSchema;
use u_dietplan::planner::{plan_week, MealPlanProblem, PlannerOptions};

fn catalog(items_per_category: usize) -> FoodCatalog {
    SyntheticCatalog::new(items_per_category)
        .generate(&mut StdRng::seed_from_u64(42))
        .expect("synthetic catalog")
}

fn goal() -> Goal {
    Goal::from_daily(Nutrients::new(2000.0, 80.0, 60.0, 2000.0)).with_forbidden_allergen("nuts")
}

fn bench_evaluate(c: &mut Criterion) {
    let catalog = catalog(20);
    let schema = SlotSchema::default();
    let goal = goal();
    let problem = MealPlanProblem::new(&catalog, &schema, &goal, PlannerOptions::default());
    let plan = problem
        .create_individual(&mut StdRng::seed_from_u64(7))
        .expect("random plan");

    c.bench_function("evaluate_plan", |b| {
        b.iter(|| black_box(problem.evaluate(black_box(&plan))))
    });
}

fn bench_plan_week(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan_week");
    group.sample_size(10);

    let schema = SlotSchema::default();
    let goal = goal();
    for &(items, pop, gen) in &[(5, 20, 50), (20, 100, 100), (50, 200, 100)] {
        let catalog = catalog(items);
        let config = EvolutionConfig::default()
            .with_population_size(pop)
            .with_survival_count(pop / 4)
            .with_stagnation(0, 0.0)
            .with_max_generations(gen)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::new(format!("i{}_p{}_g{}", items, pop, gen), items),
            &(catalog, config),
            |b, (cat, cfg)| {
                b.iter(|| {
                    let result = plan_week(
                        black_box(cat),
                        &schema,
                        &goal,
                        cfg.clone(),
                        PlannerOptions::default(),
                    );
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_evaluate, bench_plan_week);
criterion_main!(benches);
