use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use directory::{
    consts::consts::PersonId,
    model::person::Person,
    view::{controller::ListViewController, state::SortKey},
};

const SAMPLE_SIZES: [u64; 3] = [100, 1_000, 10_000];

const ROLES: [&str; 4] = ["Developer", "Designer", "Manager", "Analyst"];

fn people(count: u64) -> Vec<Person> {
    (1..=count)
        .map(|id| {
            let mut person = Person::new_test();
            person.id = PersonId(id);
            person.name = format!("Person {}", id);
            person.email = format!("person{}@example.com", id);
            person.role = ROLES[id as usize % ROLES.len()].to_string();
            person
        })
        .collect()
}

pub fn view_recompute_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("view_recompute");

    for size in SAMPLE_SIZES.iter() {
        let mut controller = ListViewController::new_test();
        controller.load(people(*size));

        group.throughput(Throughput::Elements(*size));

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                controller.set_search("person 1");
                controller.set_role_filter(Some("Developer".to_string()));
                controller.set_sort(SortKey::Email);
                controller.set_search("");
            })
        });
    }

    group.finish();
}

criterion_group!(benches, view_recompute_benchmark);
criterion_main!(benches);
