//! Benchmarks for table conversion and comparison.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tablecast::{table, Assist, Table};

#[derive(Debug, Default)]
struct Person {
    name: String,
    height: i64,
    nickname: Option<String>,
}

tablecast::impl_record!(Person {
    "Name" => name: String,
    "Height" => height: i64,
    "Nickname" => nickname: Option<String>,
});

fn people_table(rows: usize) -> Table {
    let mut table = table![["Name", "Height", "Nickname"]];
    for i in 0..rows {
        table.push_row([format!("person-{i}"), (150 + i % 50).to_string(), "N/A".to_string()]);
    }
    table
}

fn conversion_benchmark(c: &mut Criterion) {
    let assist = Assist::with_defaults();
    let single = table![["Name", "John"], ["Height", "182"], ["Nickname", "Johnny"]];
    let many = people_table(100);

    c.bench_function("create_instance", |b| {
        b.iter(|| {
            let person: Person = assist
                .create_instance(black_box(&single))
                .unwrap_or_default();
            black_box(person)
        })
    });

    c.bench_function("create_list_100", |b| {
        b.iter(|| {
            let people: Vec<Person> = assist.create_list(black_box(&many)).unwrap_or_default();
            black_box(people)
        })
    });

    let people: Vec<Person> = assist.create_list(&many).unwrap_or_default();
    c.bench_function("compare_to_list_100", |b| {
        b.iter(|| black_box(assist.compare_to_list::<Person>(&people, black_box(&many)).is_ok()))
    });
}

criterion_group!(benches, conversion_benchmark);
criterion_main!(benches);
