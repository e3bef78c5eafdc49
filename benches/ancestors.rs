use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gosim::{GoTermId, Namespace, Ontology};

/// Builds a DAG with `levels` levels of `width` terms each; every term
/// has two parents in the level above, so ancestor sets overlap heavily.
fn build_ontology(levels: u32, width: u32) -> Ontology {
    let mut ontology = Ontology::default();
    ontology.insert_term("root", 1u32, Namespace::BiologicalProcess);
    for level in 1..=levels {
        for i in 0..width {
            let id = level * 1000 + i;
            ontology.insert_term(&format!("term {id}"), id, Namespace::BiologicalProcess);
            if level == 1 {
                ontology.add_parent(1u32, id).unwrap();
            } else {
                ontology.add_parent((level - 1) * 1000 + i, id).unwrap();
                ontology
                    .add_parent((level - 1) * 1000 + (i + 1) % width, id)
                    .unwrap();
            }
        }
    }
    ontology
}

fn uncached_ancestors(ontology: &Ontology, levels: u32, width: u32) -> usize {
    let mut total = 0;
    for level in 1..=levels {
        for i in 0..width {
            let id = GoTermId::from(level * 1000 + i);
            total += ontology.ancestors_of(id).unwrap().len();
        }
    }
    total
}

fn common_ancestors(ontology: &Ontology, width: u32) -> usize {
    let mut largest = 0;
    for i in 0..width {
        let term1 = ontology.term(GoTermId::from(4000 + i)).unwrap();
        for j in 0..width {
            let term2 = ontology.term(GoTermId::from(4000 + j)).unwrap();
            let overlap = term1.common_ancestor_ids(&term2).len();
            if overlap > largest {
                largest = overlap;
            }
        }
    }
    largest
}

fn ancestors_benchmark(c: &mut Criterion) {
    let ontology = build_ontology(4, 50);

    c.bench_function("ancestors uncached", |b| {
        b.iter(|| uncached_ancestors(black_box(&ontology), 4, 50))
    });

    let mut cached = build_ontology(4, 50);
    cached.create_cache();

    c.bench_function("ancestors cached", |b| {
        b.iter(|| uncached_ancestors(black_box(&cached), 4, 50))
    });

    c.bench_function("common ancestors", |b| {
        b.iter(|| common_ancestors(black_box(&cached), 50))
    });

    c.bench_function("create_cache", |b| {
        b.iter(|| {
            let mut ontology = build_ontology(4, 50);
            ontology.create_cache();
            ontology.len()
        })
    });
}

criterion_group!(ancestors, ancestors_benchmark);
criterion_main!(ancestors);
