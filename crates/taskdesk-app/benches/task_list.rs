#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use taskdesk_app::{TaskListFilter, TaskListFilterBuilder, project_rows};
use taskdesk_core::{Contact, ContactId, NewTask, Task, TaskId, TaskPriority, TaskStatus};
use time::{Duration, OffsetDateTime, macros::datetime};

const NOW: OffsetDateTime = datetime!(2025-06-01 09:00 UTC);

fn build_tasks(count: u64) -> Vec<Task> {
    (1..=count)
        .map(|id| {
            let status = TaskStatus::ALL[usize::try_from(id % 3).unwrap_or(0)];
            let priority = TaskPriority::ALL[usize::try_from(id % 3).unwrap_or(0)];
            Task::from_new(
                TaskId(id),
                NewTask {
                    title: format!("Follow up on quote #{id}"),
                    description: Some(format!("Call back about renewal batch {}", id % 17)),
                    status: Some(status),
                    priority: Some(priority),
                    due_date: Some(NOW + Duration::days(i64::try_from(id % 11).unwrap_or(0) - 5)),
                    contact_id: Some(ContactId(id % 5 + 1)),
                    ..NewTask::default()
                },
                NOW - Duration::days(30),
            )
        })
        .collect()
}

fn build_contacts() -> Vec<Contact> {
    (1..=5)
        .map(|id| Contact {
            id: ContactId(id),
            name: format!("Contact {id}"),
            company: format!("Company {id}"),
            email: None,
            phone: None,
        })
        .collect()
}

fn filter_cases() -> Vec<(&'static str, TaskListFilter)> {
    let narrowed = TaskListFilterBuilder::new()
        .with_search(Some("RENEWAL".into()))
        .with_status(Some("pending"))
        .and_then(|builder| builder.with_priority(Some("high")))
        .map(TaskListFilterBuilder::build)
        .unwrap_or_else(|err| panic!("bench filter must build: {err}"));
    vec![("unfiltered", TaskListFilter::default()), ("narrowed", narrowed)]
}

fn project_rows_benchmark(c: &mut Criterion) {
    let contacts = build_contacts();
    let mut group = c.benchmark_group("task_list_project_rows");
    for &count in &[100u64, 1_000, 10_000] {
        let tasks = build_tasks(count);
        for (name, filter) in filter_cases() {
            group.bench_with_input(BenchmarkId::new(name, count), &tasks, |b, tasks| {
                b.iter(|| black_box(project_rows(tasks, &contacts, &filter, NOW)));
            });
        }
    }
    group.finish();
}

criterion_group!(benches, project_rows_benchmark);
criterion_main!(benches);
