use anyhow::{Context, Result, anyhow, bail};
use taskdesk_app::{
    AppConfig, FormField, FormMode, Notice, SubmitOutcome, TaskForm, TaskListFilterBuilder,
    TaskListPage, TaskRow,
};
use taskdesk_core::{RawId, Task};
use taskdesk_store::ContactDirectory;
use time::OffsetDateTime;

use crate::{Command, FieldArgs};

pub async fn run(command: Command, config: &AppConfig) -> Result<()> {
    let (store, contacts) = config.open_stores()?;
    match command {
        Command::List {
            search,
            status,
            priority,
        } => {
            let filter = TaskListFilterBuilder::new()
                .with_search(search)
                .with_status(status.as_deref())
                .and_then(|builder| builder.with_priority(priority.as_deref()))
                .map_err(|err| anyhow!(err.describe_user_facing()))?
                .build();

            let mut page = TaskListPage::new(store, contacts);
            if let Some(notice) = page.load().await {
                bail!(notice);
            }
            *page.filter_mut() = filter;
            print_rows(&page, OffsetDateTime::now_utc());
            Ok(())
        }

        Command::Show { task } => {
            let task = store.get_by_id(task).await?;
            print_json(&task)
        }

        Command::ByContact { contact } => {
            let tasks = store.get_by_contact_id(contact).await?;
            print_json(&tasks)
        }

        Command::New { title, fields } => {
            let mut form = TaskForm::new(store, contacts, FormMode::Create);
            open_form(&mut form).await?;
            form.set_field(FormField::Title, title);
            apply_fields(&mut form, fields);
            submit_form(&mut form).await
        }

        Command::Edit {
            task,
            title,
            fields,
        } => {
            let mode = FormMode::from_route(Some(task.as_str()))?;
            let mut form = TaskForm::new(store, contacts, mode);
            open_form(&mut form).await?;
            if let Some(title) = title {
                form.set_field(FormField::Title, title);
            }
            apply_fields(&mut form, fields);
            submit_form(&mut form).await
        }

        Command::Delete { task } => {
            let id = RawId::from(task).into_task_id()?;
            let notice = TaskListPage::new(store, contacts).delete(id).await;
            finish(notice)
        }
    }
}

async fn open_form(form: &mut TaskForm<ContactDirectory>) -> Result<()> {
    form.open().await.map_or(Ok(()), |notice| Err(anyhow!(notice)))
}

fn apply_fields(form: &mut TaskForm<ContactDirectory>, fields: FieldArgs) {
    let FieldArgs {
        description,
        status,
        priority,
        due,
        assignee,
        contact,
    } = fields;
    let updates = [
        (FormField::Description, description),
        (FormField::Status, status),
        (FormField::Priority, priority),
        (FormField::DueDate, due),
        (FormField::AssignedTo, assignee),
        (FormField::ContactId, contact),
    ];
    for (field, value) in updates {
        if let Some(value) = value {
            form.set_field(field, value);
        }
    }
}

async fn submit_form(form: &mut TaskForm<ContactDirectory>) -> Result<()> {
    match form.submit().await {
        SubmitOutcome::Saved { task, notice } => {
            println!("{notice}");
            print_json(&task)
        }
        SubmitOutcome::Invalid { notice, .. } | SubmitOutcome::InFlight { notice } => {
            Err(anyhow!(notice))
        }
        SubmitOutcome::Failed { notice, error } => Err(anyhow!(error).context(notice)),
    }
}

fn finish(notice: Notice) -> Result<()> {
    if notice.is_error() {
        bail!(notice);
    }
    println!("{notice}");
    Ok(())
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to render JSON")?;
    println!("{rendered}");
    Ok(())
}

fn print_rows(page: &TaskListPage<ContactDirectory>, now: OffsetDateTime) {
    let rows = page.rows(now);
    if let Some(empty) = page.empty_state() {
        println!("{}", empty.title);
        println!("{}", empty.description);
        return;
    }
    for row in &rows {
        println!("{}", render_row(row));
    }
    let filters = page.filter().active_filter_count();
    println!(
        "{} of {} tasks, {filters} active filter{}",
        rows.len(),
        page.tasks().len(),
        if filters == 1 { "" } else { "s" }
    );
}

fn render_row(row: &TaskRow<'_>) -> String {
    let Task {
        id,
        title,
        status,
        priority,
        ..
    } = row.task;
    let mut line = format!("#{id:<4} [{}] [{}] {title}", status.badge_text(), priority.label());
    if let Some(name) = row.contact_name {
        line.push_str(&format!("  @{name}"));
    }
    if row.overdue {
        line.push_str("  OVERDUE");
    }
    line
}
