use chrono::NaiveDate;
use leptos::*;

use crate::api::{use_services, StoreError};
use crate::icons::Icon;
use crate::models::{Employee, EmployeeDraft, EmployeeStatus};
use crate::state::use_toast;

use super::employee_form::{
    validate_employee, EmployeeFormData, EmployeeFormErrors, EmployeeFormFields,
};

/// Case-insensitive substring match across name, department and position.
pub(crate) fn filter_employees(employees: &[Employee], term: &str) -> Vec<Employee> {
    let needle = term.to_lowercase();
    employees
        .iter()
        .filter(|employee| {
            employee.name.to_lowercase().contains(&needle)
                || employee.department.to_lowercase().contains(&needle)
                || employee.position.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

fn format_join_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

fn initials(name: &str) -> String {
    name.chars().take(2).collect::<String>().to_uppercase()
}

#[derive(Clone)]
enum Modal {
    Closed,
    Add,
    Edit(Employee),
    ConfirmDelete(Employee),
}

#[derive(Clone)]
enum Mutation {
    Create(EmployeeDraft),
    Update(String, EmployeeDraft),
    Delete(String),
}

/// Employee management page: fetch, locally filter, and render the roster
/// with modal-driven create/edit/delete flows.
#[component]
pub fn Employees() -> impl IntoView {
    let services = use_services();
    let toast = use_toast();

    let (search, set_search) = create_signal(String::new());
    let (modal, set_modal) = create_signal(Modal::Closed);
    let (form, set_form) = create_signal(EmployeeFormData::blank());
    let (errors, set_errors) = create_signal(EmployeeFormErrors::default());

    // Last successful fetch; filtering works against this cached copy.
    let (employees, set_employees) = create_signal(Vec::<Employee>::new());
    let (trigger, set_trigger) = create_signal(0u32);

    let list_service = services.employees.clone();
    let roster = create_local_resource(
        move || trigger.get(),
        move |_| {
            let service = list_service.clone();
            async move { service.list(&[], 1, 50).await }
        },
    );

    create_effect(move |_| {
        if let Some(result) = roster.get() {
            match result {
                Ok(list) => set_employees.set(list),
                Err(err) => {
                    log::error!("Failed to load employees: {err}");
                    toast.error("Employees could not be loaded. Please try again.");
                }
            }
        }
    });

    let filtered = create_memo(move |_| {
        employees.with(|list| search.with(|term| filter_employees(list, term)))
    });

    let mutation_service = services.employees.clone();
    let mutate = create_action(move |mutation: &Mutation| {
        let mutation = mutation.clone();
        let service = mutation_service.clone();
        async move {
            match mutation {
                Mutation::Create(draft) => service
                    .create(&draft)
                    .await
                    .map(|_| "Employee added successfully!"),
                Mutation::Update(id, draft) => service
                    .update(&id, &draft)
                    .await
                    .map(|_| "Employee updated successfully!"),
                Mutation::Delete(id) => service
                    .delete(&id)
                    .await
                    .map(|_| "Employee deleted successfully!"),
            }
        }
    });
    let mutating = mutate.pending();

    // On success: close the modal, reset the form, refetch the roster. On
    // failure the modal stays open for a retry.
    create_effect(move |_| {
        if let Some(result) = mutate.value().get() {
            match result {
                Ok(message) => {
                    toast.success(message);
                    set_modal.set(Modal::Closed);
                    set_form.set(EmployeeFormData::blank());
                    set_errors.set(EmployeeFormErrors::default());
                    set_trigger.update(|n| *n += 1);
                }
                Err(err) => {
                    log::error!("Employee mutation failed: {err}");
                    toast.error(notification_for(&err));
                }
            }
        }
    });

    let open_add = move |_| {
        set_form.set(EmployeeFormData::blank());
        set_errors.set(EmployeeFormErrors::default());
        set_modal.set(Modal::Add);
    };

    let submit_form = move || match validate_employee(&form.get_untracked()) {
        Ok(draft) => {
            set_errors.set(EmployeeFormErrors::default());
            match modal.get_untracked() {
                Modal::Add => mutate.dispatch(Mutation::Create(draft)),
                Modal::Edit(employee) => mutate.dispatch(Mutation::Update(employee.id, draft)),
                _ => {}
            }
        }
        Err(found) => set_errors.set(found),
    };

    view! {
        <div class="page employees-page">
            <header class="page-header">
                <h1>"Employee Management"</h1>
                <p>"Manage your organization's workforce"</p>
            </header>

            <div class="page-controls">
                <div class="search-box">
                    <Icon name="search" size=18 />
                    <input
                        type="text"
                        class="input"
                        placeholder="Search employees..."
                        prop:value=move || search.get()
                        on:input=move |ev| set_search.set(event_target_value(&ev))
                    />
                </div>
                <button class="button button-primary" on:click=open_add>
                    <Icon name="user-plus" size=18 />
                    <span>"Add Employee"</span>
                </button>
            </div>

            <div class="card table-card">
                <Show
                    when=move || !roster.loading().get() || !employees.with(Vec::is_empty)
                    fallback=|| view! { <div class="loading">"Loading employees..."</div> }
                >
                    <Show
                        when=move || !filtered.with(Vec::is_empty)
                        fallback=move || view! { <EmptyRoster searching=search /> }
                    >
                        <table class="data-table">
                            <thead>
                                <tr>
                                    <th>"Name"</th>
                                    <th>"Department"</th>
                                    <th>"Position"</th>
                                    <th>"Join Date"</th>
                                    <th>"Status"</th>
                                    <th class="actions-column">"Actions"</th>
                                </tr>
                            </thead>
                            <tbody>
                                <For
                                    each=move || filtered.get()
                                    key=|employee| employee.id.clone()
                                    children=move |employee| {
                                        let edit_target = employee.clone();
                                        let delete_target = employee.clone();
                                        view! {
                                            <tr>
                                                <td>
                                                    <div class="employee-cell">
                                                        <div class="avatar">{initials(&employee.name)}</div>
                                                        <div>
                                                            <div class="employee-name">{employee.name.clone()}</div>
                                                            <div class="employee-email">{employee.email.clone()}</div>
                                                        </div>
                                                    </div>
                                                </td>
                                                <td>{employee.department.clone()}</td>
                                                <td>{employee.position.clone()}</td>
                                                <td>{format_join_date(employee.join_date)}</td>
                                                <td>
                                                    <span class=status_badge_class(employee.status)>
                                                        {employee.status.label()}
                                                    </span>
                                                </td>
                                                <td class="actions-column">
                                                    <button
                                                        class="icon-button"
                                                        aria-label="Edit employee"
                                                        on:click=move |_| {
                                                            set_form.set(EmployeeFormData::from_employee(&edit_target));
                                                            set_errors.set(EmployeeFormErrors::default());
                                                            set_modal.set(Modal::Edit(edit_target.clone()));
                                                        }
                                                    >
                                                        <Icon name="edit" size=16 />
                                                    </button>
                                                    <button
                                                        class="icon-button icon-button-danger"
                                                        aria-label="Delete employee"
                                                        on:click=move |_| {
                                                            set_modal.set(Modal::ConfirmDelete(delete_target.clone()));
                                                        }
                                                    >
                                                        <Icon name="trash" size=16 />
                                                    </button>
                                                </td>
                                            </tr>
                                        }
                                    }
                                />
                            </tbody>
                        </table>
                    </Show>
                </Show>
            </div>

            <Show when=move || matches!(modal.get(), Modal::Add | Modal::Edit(_))>
                <div class="modal-backdrop">
                    <div class="modal">
                        <div class="modal-header">
                            <h3>
                                {move || match modal.get() {
                                    Modal::Edit(_) => "Edit Employee",
                                    _ => "Add New Employee",
                                }}
                            </h3>
                            <button
                                class="icon-button"
                                aria-label="Close"
                                on:click=move |_| set_modal.set(Modal::Closed)
                            >
                                <Icon name="x" size=20 />
                            </button>
                        </div>
                        <div class="modal-body">
                            <EmployeeFormFields
                                form=form
                                set_form=set_form
                                errors=errors
                                set_errors=set_errors
                            />
                            <div class="modal-actions">
                                <button
                                    class="button button-outline"
                                    on:click=move |_| set_modal.set(Modal::Closed)
                                >
                                    "Cancel"
                                </button>
                                <button
                                    class="button button-primary"
                                    disabled=move || mutating.get()
                                    on:click=move |_| submit_form()
                                >
                                    {move || match modal.get() {
                                        Modal::Edit(_) => "Update Employee",
                                        _ => "Add Employee",
                                    }}
                                </button>
                            </div>
                        </div>
                    </div>
                </div>
            </Show>

            <Show when=move || matches!(modal.get(), Modal::ConfirmDelete(_))>
                <div class="modal-backdrop">
                    <div class="modal modal-confirm">
                        <div class="modal-body">
                            <div class="confirm-icon">
                                <Icon name="trash" size=24 />
                            </div>
                            <h3>"Delete Employee"</h3>
                            <p>
                                {move || match modal.get() {
                                    Modal::ConfirmDelete(employee) => format!(
                                        "Are you sure you want to delete {}? This action cannot be undone.",
                                        employee.name
                                    ),
                                    _ => String::new(),
                                }}
                            </p>
                            <div class="modal-actions">
                                <button
                                    class="button button-outline"
                                    on:click=move |_| set_modal.set(Modal::Closed)
                                >
                                    "Cancel"
                                </button>
                                <button
                                    class="button button-danger"
                                    disabled=move || mutating.get()
                                    on:click=move |_| {
                                        if let Modal::ConfirmDelete(employee) = modal.get_untracked() {
                                            mutate.dispatch(Mutation::Delete(employee.id));
                                        }
                                    }
                                >
                                    "Delete"
                                </button>
                            </div>
                        </div>
                    </div>
                </div>
            </Show>
        </div>
    }
}

fn status_badge_class(status: EmployeeStatus) -> &'static str {
    match status {
        EmployeeStatus::Active => "badge badge-success",
        EmployeeStatus::OnLeave => "badge badge-warning",
    }
}

fn notification_for(err: &StoreError) -> String {
    match err {
        StoreError::Unauthorized => "Your session has expired. Please log in again.".to_string(),
        _ => "The request could not be completed. Please try again.".to_string(),
    }
}

/// Empty state shown when the roster or the filter result is empty.
#[component]
fn EmptyRoster(searching: ReadSignal<String>) -> impl IntoView {
    view! {
        <div class="empty-state">
            <div class="empty-state-icon">
                <Icon name="user" size=24 />
            </div>
            <h3>"No employees found"</h3>
            <p>
                {move || {
                    if searching.with(|term| term.is_empty()) {
                        "There are no employees in the system yet. Add your first employee to get started."
                    } else {
                        "No employees match your search criteria. Try a different search."
                    }
                }}
            </p>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(name: &str, department: &str, position: &str) -> Employee {
        Employee {
            id: format!("emp-{name}"),
            name: name.to_string(),
            email: format!("{}@staffsphere.com", name.to_lowercase()),
            phone: "(555) 000-0000".to_string(),
            department: department.to_string(),
            position: position.to_string(),
            join_date: NaiveDate::from_ymd_opt(2021, 1, 10).unwrap(),
            status: EmployeeStatus::Active,
        }
    }

    fn roster() -> Vec<Employee> {
        vec![
            employee("Alex Morgan", "Human Resources", "HR Manager"),
            employee("Jordan Smith", "Engineering", "Senior Developer"),
            employee("Riley Brown", "Engineering", "UI/UX Designer"),
            employee("Jamie Garcia", "Sales", "Sales Representative"),
        ]
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let matched = filter_employees(&roster(), "ENGINEERING");
        assert_eq!(matched.len(), 2);

        let matched = filter_employees(&roster(), "alex");
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].name, "Alex Morgan");
    }

    #[test]
    fn test_filter_matches_name_or_department_or_position() {
        // Position match only.
        let matched = filter_employees(&roster(), "designer");
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].name, "Riley Brown");

        // Department match.
        let matched = filter_employees(&roster(), "sales");
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].name, "Jamie Garcia");
    }

    #[test]
    fn test_filter_empty_term_returns_everything() {
        assert_eq!(filter_employees(&roster(), "").len(), 4);
    }

    #[test]
    fn test_filter_empty_list_yields_empty_result() {
        assert!(filter_employees(&[], "anything").is_empty());
    }

    #[test]
    fn test_filter_no_match() {
        assert!(filter_employees(&roster(), "accounting").is_empty());
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("Alex Morgan"), "AL");
        assert_eq!(initials("x"), "X");
    }

    #[test]
    fn test_format_join_date() {
        let date = NaiveDate::from_ymd_opt(2020, 3, 5).unwrap();
        assert_eq!(format_join_date(date), "Mar 5, 2020");
    }
}
