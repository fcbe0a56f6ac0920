use chrono::{Duration, NaiveDate, Utc};
use leptos::*;

use crate::api::{use_services, ActivityService, LeaveRequestService, StoreError, TaskService};
use crate::icons::Icon;
use crate::models::{
    ActivityDraft, ActivityStatus, LeaveRequestDraft, LeaveType, TaskDraft, TaskPriority,
};
use crate::state::use_toast;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tab {
    QuickAdd,
    Recent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ActionType {
    Task,
    Leave,
}

/// Raw quick-action form state, mirroring the inputs.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct QuickActionForm {
    pub employee: String,
    pub action_type: ActionType,
    pub task_description: String,
    pub priority: TaskPriority,
    pub due_date: String,
    pub leave_type: LeaveType,
    pub leave_start: String,
    pub leave_end: String,
    pub leave_reason: String,
}

impl QuickActionForm {
    pub fn defaults() -> Self {
        let today = Utc::now().date_naive();
        Self {
            employee: String::new(),
            action_type: ActionType::Task,
            task_description: String::new(),
            priority: TaskPriority::Medium,
            due_date: today.to_string(),
            leave_type: LeaveType::Vacation,
            leave_start: today.to_string(),
            leave_end: (today + Duration::days(7)).to_string(),
            leave_reason: String::new(),
        }
    }

    /// Post-submit reset: everything returns to its default except the
    /// employee, which is kept for the next entry.
    pub fn reset_keeping_employee(&self) -> Self {
        let mut next = Self::defaults();
        next.employee = self.employee.clone();
        next
    }
}

/// Field-level validation errors, all flagged in one pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct QuickActionErrors {
    pub employee: Option<&'static str>,
    pub task_description: Option<&'static str>,
    pub leave_reason: Option<&'static str>,
    pub leave_end: Option<&'static str>,
}

impl QuickActionErrors {
    pub fn is_empty(&self) -> bool {
        self.employee.is_none()
            && self.task_description.is_none()
            && self.leave_reason.is_none()
            && self.leave_end.is_none()
    }
}

/// Validated submission payload: exactly one of a task or a leave request.
#[derive(Debug, Clone)]
pub(crate) enum QuickActionPayload {
    Task(TaskDraft),
    Leave(LeaveRequestDraft),
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Validate the form synchronously on submit attempt. On failure every
/// violated field is reported at once and no payload is produced, so nothing
/// reaches the network.
pub(crate) fn validate(form: &QuickActionForm) -> Result<QuickActionPayload, QuickActionErrors> {
    let mut errors = QuickActionErrors::default();

    let employee = form.employee.trim();
    if employee.is_empty() {
        errors.employee = Some("Employee name is required");
    } else if employee.len() < 3 {
        errors.employee = Some("Name must be at least 3 characters");
    }

    match form.action_type {
        ActionType::Task => {
            if form.task_description.trim().is_empty() {
                errors.task_description = Some("Task description is required");
            }
        }
        ActionType::Leave => {
            if form.leave_reason.trim().is_empty() {
                errors.leave_reason = Some("Please provide a reason for leave");
            }
            match (parse_date(&form.leave_start), parse_date(&form.leave_end)) {
                (Some(start), Some(end)) => {
                    if end < start {
                        errors.leave_end = Some("End date must be after start date");
                    }
                }
                _ => {
                    errors.leave_end = Some("Enter valid start and end dates");
                }
            }
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let today = Utc::now().date_naive();
    let payload = match form.action_type {
        ActionType::Task => QuickActionPayload::Task(TaskDraft {
            description: form.task_description.trim().to_string(),
            priority: form.priority,
            due_date: parse_date(&form.due_date).unwrap_or(today),
            status: "pending".to_string(),
            assigned_to: employee.to_string(),
        }),
        ActionType::Leave => QuickActionPayload::Leave(LeaveRequestDraft {
            leave_type: form.leave_type,
            // Both dates parsed successfully above.
            start_date: parse_date(&form.leave_start).unwrap_or(today),
            end_date: parse_date(&form.leave_end).unwrap_or(today),
            reason: form.leave_reason.trim().to_string(),
            status: "pending".to_string(),
            employee: employee.to_string(),
        }),
    };

    Ok(payload)
}

/// Fire the one create call the payload stands for, then append the derived
/// feed entry. Returns the entry so the caller can report it upward.
pub(crate) async fn submit(
    tasks: &TaskService,
    leaves: &LeaveRequestService,
    activities: &ActivityService,
    payload: &QuickActionPayload,
) -> Result<ActivityDraft, StoreError> {
    let draft = match payload {
        QuickActionPayload::Task(task) => {
            tasks.create(task).await?;
            ActivityDraft {
                user: task.assigned_to.clone(),
                action: format!(
                    "was assigned a new {} priority task",
                    task.priority.as_str()
                ),
                time: None,
                status: if task.priority == TaskPriority::High {
                    ActivityStatus::Critical
                } else {
                    ActivityStatus::Pending
                },
                activity_type: "task".to_string(),
            }
        }
        QuickActionPayload::Leave(leave) => {
            leaves.create(leave).await?;
            ActivityDraft {
                user: leave.employee.clone(),
                action: format!("requested {} leave", leave.leave_type.as_str()),
                time: None,
                status: ActivityStatus::Pending,
                activity_type: "leave".to_string(),
            }
        }
    };

    activities.create(&draft).await?;
    Ok(draft)
}

/// Tabbed quick-action card: create a task or a leave request for an
/// employee, then report the derived activity upward.
#[component]
pub fn QuickAction(#[prop(into)] on_recorded: Callback<ActivityDraft>) -> impl IntoView {
    let services = use_services();
    let toast = use_toast();

    let (tab, set_tab) = create_signal(Tab::QuickAdd);
    let (form, set_form) = create_signal(QuickActionForm::defaults());
    let (errors, set_errors) = create_signal(QuickActionErrors::default());
    let (success_message, set_success_message) = create_signal(None::<String>);

    let submit_action = create_action(move |payload: &QuickActionPayload| {
        let payload = payload.clone();
        let services = services.clone();
        async move {
            submit(
                &services.tasks,
                &services.leaves,
                &services.activities,
                &payload,
            )
            .await
        }
    });
    let submitting = submit_action.pending();

    create_effect(move |_| {
        if let Some(result) = submit_action.value().get() {
            match result {
                Ok(draft) => {
                    let message = if draft.activity_type == "task" {
                        "Task assigned successfully!"
                    } else {
                        "Leave request submitted successfully!"
                    };
                    set_success_message.set(Some(message.to_string()));
                    set_form.update(|form| *form = form.reset_keeping_employee());

                    #[cfg(target_arch = "wasm32")]
                    {
                        use gloo_timers::callback::Timeout;
                        Timeout::new(5_000, move || set_success_message.set(None)).forget();
                    }

                    on_recorded.call(draft);
                }
                Err(err) => {
                    log::error!("Quick action failed: {err}");
                    toast.error("An error occurred. Please try again.");
                }
            }
        }
    });

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        match validate(&form.get_untracked()) {
            Ok(payload) => {
                set_errors.set(QuickActionErrors::default());
                submit_action.dispatch(payload);
            }
            Err(found) => {
                set_errors.set(found);
                toast.error("Please fix the errors in the form");
            }
        }
    };

    let tab_class = move |this: Tab| {
        if tab.get() == this {
            "tab-button active"
        } else {
            "tab-button"
        }
    };

    view! {
        <div class="card quick-action-card">
            <div class="tab-bar">
                <button
                    class=move || tab_class(Tab::QuickAdd)
                    on:click=move |_| {
                        set_tab.set(Tab::QuickAdd);
                        set_errors.set(QuickActionErrors::default());
                        set_success_message.set(None);
                    }
                >
                    <Icon name="user-plus" size=16 />
                    "Quick Actions"
                </button>
                <button
                    class=move || tab_class(Tab::Recent)
                    on:click=move |_| {
                        set_tab.set(Tab::Recent);
                        set_errors.set(QuickActionErrors::default());
                        set_success_message.set(None);
                    }
                >
                    <Icon name="clock" size=16 />
                    "Recent Actions"
                </button>
            </div>

            <div class="tab-body">
                <Show
                    when=move || tab.get() == Tab::QuickAdd
                    fallback=|| view! { <RecentActions /> }
                >
                    <h2 class="card-title">"Create New Activity"</h2>

                    <Show when=move || success_message.get().is_some()>
                        <div class="banner banner-success">
                            <Icon name="check-circle" size=18 />
                            <span>{move || success_message.get().unwrap_or_default()}</span>
                            <button
                                class="banner-dismiss"
                                on:click=move |_| set_success_message.set(None)
                            >
                                <Icon name="x-circle" size=18 />
                            </button>
                        </div>
                    </Show>

                    <form class="quick-action-form" on:submit=on_submit novalidate=true>
                        <div class="form-field">
                            <label for="employee">"Employee Name"</label>
                            <input
                                id="employee"
                                type="text"
                                placeholder="Enter employee name"
                                prop:value=move || form.get().employee
                                class=move || field_class(errors.get().employee)
                                on:input=move |ev| {
                                    set_form.update(|f| f.employee = event_target_value(&ev));
                                    set_errors.update(|e| e.employee = None);
                                }
                            />
                            <FieldError message=Signal::derive(move || errors.get().employee) />
                        </div>

                        <div class="form-field">
                            <span class="field-label">"Action Type"</span>
                            <div class="action-type-choices">
                                <label class=move || {
                                    choice_class(form.get().action_type == ActionType::Task)
                                }>
                                    <input
                                        type="radio"
                                        name="action-type"
                                        prop:checked=move || {
                                            form.get().action_type == ActionType::Task
                                        }
                                        on:change=move |_| {
                                            set_form.update(|f| f.action_type = ActionType::Task);
                                        }
                                    />
                                    <Icon name="clipboard-check" size=18 />
                                    "Assign Task"
                                </label>
                                <label class=move || {
                                    choice_class(form.get().action_type == ActionType::Leave)
                                }>
                                    <input
                                        type="radio"
                                        name="action-type"
                                        prop:checked=move || {
                                            form.get().action_type == ActionType::Leave
                                        }
                                        on:change=move |_| {
                                            set_form.update(|f| f.action_type = ActionType::Leave);
                                        }
                                    />
                                    <Icon name="calendar" size=18 />
                                    "Request Leave"
                                </label>
                            </div>
                        </div>

                        <Show
                            when=move || form.get().action_type == ActionType::Task
                            fallback=move || view! {
                                <LeaveFields form=form set_form=set_form errors=errors set_errors=set_errors />
                            }
                        >
                            <TaskFields form=form set_form=set_form errors=errors set_errors=set_errors />
                        </Show>

                        <button
                            type="submit"
                            class="button button-primary button-block"
                            disabled=move || submitting.get()
                        >
                            {move || {
                                if submitting.get() {
                                    "Processing..."
                                } else if form.get().action_type == ActionType::Task {
                                    "Assign Task"
                                } else {
                                    "Submit Leave Request"
                                }
                            }}
                        </button>
                    </form>
                </Show>
            </div>
        </div>
    }
}

fn field_class(error: Option<&'static str>) -> &'static str {
    if error.is_some() {
        "input input-invalid"
    } else {
        "input"
    }
}

fn choice_class(selected: bool) -> &'static str {
    if selected {
        "action-type-choice selected"
    } else {
        "action-type-choice"
    }
}

/// Inline validation message under a field.
#[component]
fn FieldError(#[prop(into)] message: Signal<Option<&'static str>>) -> impl IntoView {
    view! {
        <Show when=move || message.get().is_some()>
            <p class="field-error">
                <Icon name="alert-triangle" size=14 />
                {move || message.get().unwrap_or_default()}
            </p>
        </Show>
    }
}

#[component]
fn TaskFields(
    form: ReadSignal<QuickActionForm>,
    set_form: WriteSignal<QuickActionForm>,
    errors: ReadSignal<QuickActionErrors>,
    set_errors: WriteSignal<QuickActionErrors>,
) -> impl IntoView {
    view! {
        <div class="form-field">
            <label for="task-description">"Task Description"</label>
            <textarea
                id="task-description"
                rows="3"
                placeholder="Describe the task clearly..."
                prop:value=move || form.get().task_description
                class=move || field_class(errors.get().task_description)
                on:input=move |ev| {
                    set_form.update(|f| f.task_description = event_target_value(&ev));
                    set_errors.update(|e| e.task_description = None);
                }
            ></textarea>
            <FieldError message=Signal::derive(move || errors.get().task_description) />
        </div>

        <div class="form-grid">
            <div class="form-field">
                <label for="priority">"Task Priority"</label>
                <select
                    id="priority"
                    class="input"
                    on:change=move |ev| {
                        if let Some(priority) = TaskPriority::from_value(&event_target_value(&ev)) {
                            set_form.update(|f| f.priority = priority);
                        }
                    }
                >
                    {TaskPriority::ALL
                        .iter()
                        .map(|priority| {
                            let value = priority.as_str();
                            view! {
                                <option
                                    value=value
                                    selected=move || form.get().priority.as_str() == value
                                >
                                    {priority.label()}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </div>

            <div class="form-field">
                <label for="due-date">"Due Date"</label>
                <input
                    id="due-date"
                    type="date"
                    class="input"
                    prop:value=move || form.get().due_date
                    on:input=move |ev| {
                        set_form.update(|f| f.due_date = event_target_value(&ev));
                    }
                />
            </div>
        </div>
    }
}

#[component]
fn LeaveFields(
    form: ReadSignal<QuickActionForm>,
    set_form: WriteSignal<QuickActionForm>,
    errors: ReadSignal<QuickActionErrors>,
    set_errors: WriteSignal<QuickActionErrors>,
) -> impl IntoView {
    view! {
        <div class="form-field">
            <label for="leave-type">"Leave Type"</label>
            <select
                id="leave-type"
                class="input"
                on:change=move |ev| {
                    if let Some(leave_type) = LeaveType::from_value(&event_target_value(&ev)) {
                        set_form.update(|f| f.leave_type = leave_type);
                    }
                }
            >
                {LeaveType::ALL
                    .iter()
                    .map(|leave_type| {
                        let value = leave_type.as_str();
                        view! {
                            <option
                                value=value
                                selected=move || form.get().leave_type.as_str() == value
                            >
                                {leave_type.label()}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </div>

        <div class="form-grid">
            <div class="form-field">
                <label for="leave-start">"Start Date"</label>
                <input
                    id="leave-start"
                    type="date"
                    class="input"
                    prop:value=move || form.get().leave_start
                    on:input=move |ev| {
                        set_form.update(|f| f.leave_start = event_target_value(&ev));
                        set_errors.update(|e| e.leave_end = None);
                    }
                />
            </div>

            <div class="form-field">
                <label for="leave-end">"End Date"</label>
                <input
                    id="leave-end"
                    type="date"
                    class=move || field_class(errors.get().leave_end)
                    prop:value=move || form.get().leave_end
                    on:input=move |ev| {
                        set_form.update(|f| f.leave_end = event_target_value(&ev));
                        set_errors.update(|e| e.leave_end = None);
                    }
                />
                <FieldError message=Signal::derive(move || errors.get().leave_end) />
            </div>
        </div>

        <div class="form-field">
            <label for="leave-reason">"Reason for Leave"</label>
            <textarea
                id="leave-reason"
                rows="3"
                placeholder="Briefly explain reason for leave request..."
                prop:value=move || form.get().leave_reason
                class=move || field_class(errors.get().leave_reason)
                on:input=move |ev| {
                    set_form.update(|f| f.leave_reason = event_target_value(&ev));
                    set_errors.update(|e| e.leave_reason = None);
                }
            ></textarea>
            <FieldError message=Signal::derive(move || errors.get().leave_reason) />
        </div>
    }
}

struct RecentItem {
    title: &'static str,
    description: &'static str,
    employee: &'static str,
    date: &'static str,
    status: &'static str,
}

const RECENT_ITEMS: [RecentItem; 4] = [
    RecentItem {
        title: "Performance Review",
        description: "Quarterly performance evaluation for marketing department",
        employee: "Jason Parker",
        date: "2 days ago",
        status: "completed",
    },
    RecentItem {
        title: "Sick Leave",
        description: "Approved for 3 days due to flu",
        employee: "Emma Wilson",
        date: "Yesterday",
        status: "approved",
    },
    RecentItem {
        title: "Project Deadline Extension",
        description: "Request for extending the mobile app development deadline",
        employee: "Michael Chen",
        date: "4 hours ago",
        status: "pending",
    },
    RecentItem {
        title: "New Hire Onboarding",
        description: "Documentation and setup for new UX designer",
        employee: "Sarah Johnson",
        date: "Just now",
        status: "in-progress",
    },
];

fn recent_badge_class(status: &str) -> &'static str {
    match status {
        "completed" | "approved" => "badge badge-success",
        "pending" => "badge badge-warning",
        "in-progress" => "badge badge-info",
        _ => "badge",
    }
}

/// Read-only sample of recent actions shown on the second tab.
#[component]
fn RecentActions() -> impl IntoView {
    view! {
        <h2 class="card-title">"Recent Actions"</h2>
        <div class="recent-list">
            {RECENT_ITEMS
                .iter()
                .map(|item| {
                    view! {
                        <div class="recent-item">
                            <div class="recent-item-header">
                                <h3>{item.title}</h3>
                                <span class=recent_badge_class(item.status)>{item.status}</span>
                            </div>
                            <p class="recent-item-description">{item.description}</p>
                            <div class="recent-item-meta">
                                <span>{item.date}</span>
                                <span>{item.employee}</span>
                            </div>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{MockCall, MockRecordStore};
    use crate::api::{ActivityService, LeaveRequestService, TaskService};
    use futures::executor::block_on;
    use std::rc::Rc;

    fn task_form() -> QuickActionForm {
        let mut form = QuickActionForm::defaults();
        form.employee = "Alex Morgan".to_string();
        form.task_description = "Prepare onboarding docs".to_string();
        form
    }

    fn leave_form(start: &str, end: &str) -> QuickActionForm {
        let mut form = QuickActionForm::defaults();
        form.employee = "Alex Morgan".to_string();
        form.action_type = ActionType::Leave;
        form.leave_reason = "Family vacation".to_string();
        form.leave_start = start.to_string();
        form.leave_end = end.to_string();
        form
    }

    #[test]
    fn test_employee_is_required_and_min_three_chars() {
        let mut form = task_form();
        form.employee = String::new();
        let errors = validate(&form).unwrap_err();
        assert_eq!(errors.employee, Some("Employee name is required"));

        form.employee = "Al".to_string();
        let errors = validate(&form).unwrap_err();
        assert_eq!(errors.employee, Some("Name must be at least 3 characters"));
    }

    #[test]
    fn test_task_requires_description() {
        let mut form = task_form();
        form.task_description = "   ".to_string();
        let errors = validate(&form).unwrap_err();
        assert_eq!(errors.task_description, Some("Task description is required"));
    }

    #[test]
    fn test_leave_end_before_start_is_blocked() {
        let form = leave_form("2024-06-10", "2024-06-05");
        let errors = validate(&form).unwrap_err();
        assert_eq!(errors.leave_end, Some("End date must be after start date"));
        // Other fields were fine, so only the end date is flagged.
        assert!(errors.leave_reason.is_none());
        assert!(errors.employee.is_none());
    }

    #[test]
    fn test_leave_equal_or_later_end_passes() {
        assert!(validate(&leave_form("2024-06-05", "2024-06-05")).is_ok());
        assert!(validate(&leave_form("2024-06-05", "2024-06-10")).is_ok());
    }

    #[test]
    fn test_all_violations_flagged_simultaneously() {
        let mut form = leave_form("2024-06-10", "2024-06-05");
        form.employee = String::new();
        form.leave_reason = String::new();

        let errors = validate(&form).unwrap_err();
        assert!(errors.employee.is_some());
        assert!(errors.leave_reason.is_some());
        assert!(errors.leave_end.is_some());
    }

    #[test]
    fn test_task_submit_fires_task_create_then_activity_create() {
        let store = Rc::new(MockRecordStore::new());
        let tasks = TaskService::new(store.clone());
        let leaves = LeaveRequestService::new(store.clone());
        let activities = ActivityService::new(store.clone());

        let payload = validate(&task_form()).unwrap();
        let draft = block_on(submit(&tasks, &leaves, &activities, &payload)).unwrap();

        let calls = store.call_log();
        assert_eq!(calls.len(), 2, "exactly one create plus one activity");
        assert!(matches!(&calls[0], MockCall::Create { collection, .. } if collection == "tasks"));
        assert!(
            matches!(&calls[1], MockCall::Create { collection, .. } if collection == "activities")
        );

        assert_eq!(draft.user, "Alex Morgan");
        assert_eq!(draft.action, "was assigned a new medium priority task");
        assert_eq!(draft.status, ActivityStatus::Pending);
        assert_eq!(draft.activity_type, "task");
    }

    #[test]
    fn test_high_priority_task_reports_critical_activity() {
        let store = Rc::new(MockRecordStore::new());
        let tasks = TaskService::new(store.clone());
        let leaves = LeaveRequestService::new(store.clone());
        let activities = ActivityService::new(store.clone());

        let mut form = task_form();
        form.priority = TaskPriority::High;
        let payload = validate(&form).unwrap();
        let draft = block_on(submit(&tasks, &leaves, &activities, &payload)).unwrap();

        assert_eq!(draft.status, ActivityStatus::Critical);
        assert_eq!(draft.action, "was assigned a new high priority task");
    }

    #[test]
    fn test_leave_submit_fires_leave_create_then_activity_create() {
        let store = Rc::new(MockRecordStore::new());
        let tasks = TaskService::new(store.clone());
        let leaves = LeaveRequestService::new(store.clone());
        let activities = ActivityService::new(store.clone());

        let payload = validate(&leave_form("2024-06-05", "2024-06-10")).unwrap();
        let draft = block_on(submit(&tasks, &leaves, &activities, &payload)).unwrap();

        let calls = store.call_log();
        assert_eq!(calls.len(), 2);
        assert!(matches!(
            &calls[0],
            MockCall::Create { collection, .. } if collection == "leave_requests"
        ));
        assert!(
            matches!(&calls[1], MockCall::Create { collection, .. } if collection == "activities")
        );

        assert_eq!(draft.action, "requested vacation leave");
        assert_eq!(draft.status, ActivityStatus::Pending);
        assert_eq!(draft.activity_type, "leave");
    }

    #[test]
    fn test_invalid_leave_produces_no_payload_and_no_calls() {
        // Validation failing means the caller never gets a payload to
        // dispatch, so the store cannot be reached.
        let form = leave_form("2024-06-10", "2024-06-05");
        assert!(validate(&form).is_err());
    }

    #[test]
    fn test_failed_task_create_skips_activity() {
        let store = Rc::new(MockRecordStore::new());
        store.fail_next.set(true);
        let tasks = TaskService::new(store.clone());
        let leaves = LeaveRequestService::new(store.clone());
        let activities = ActivityService::new(store.clone());

        let payload = validate(&task_form()).unwrap();
        let result = block_on(submit(&tasks, &leaves, &activities, &payload));

        assert!(result.is_err());
        assert_eq!(store.call_log().len(), 1, "no activity after a failed create");
    }

    #[test]
    fn test_reset_keeps_employee_only() {
        let mut form = leave_form("2024-06-05", "2024-06-10");
        form.priority = TaskPriority::High;

        let reset = form.reset_keeping_employee();
        assert_eq!(reset.employee, "Alex Morgan");
        assert_eq!(reset.action_type, ActionType::Task);
        assert_eq!(reset.priority, TaskPriority::Medium);
        assert!(reset.leave_reason.is_empty());
        assert!(reset.task_description.is_empty());
    }
}
