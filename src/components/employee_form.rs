use chrono::NaiveDate;
use leptos::*;

use crate::icons::Icon;
use crate::models::employee::DEPARTMENTS;
use crate::models::{Employee, EmployeeDraft, EmployeeStatus};

/// Raw employee form state, mirroring the inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EmployeeFormData {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub position: String,
    pub join_date: String,
    pub status: EmployeeStatus,
}

impl EmployeeFormData {
    pub fn blank() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            department: String::new(),
            position: String::new(),
            join_date: String::new(),
            status: EmployeeStatus::Active,
        }
    }

    /// Seed the form from an existing record for editing.
    pub fn from_employee(employee: &Employee) -> Self {
        Self {
            name: employee.name.clone(),
            email: employee.email.clone(),
            phone: employee.phone.clone(),
            department: employee.department.clone(),
            position: employee.position.clone(),
            join_date: employee.join_date.to_string(),
            status: employee.status,
        }
    }
}

/// Field-level validation errors, all flagged in one pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct EmployeeFormErrors {
    pub name: Option<&'static str>,
    pub email: Option<&'static str>,
    pub phone: Option<&'static str>,
    pub department: Option<&'static str>,
    pub position: Option<&'static str>,
    pub join_date: Option<&'static str>,
}

impl EmployeeFormErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.department.is_none()
            && self.position.is_none()
            && self.join_date.is_none()
    }
}

/// Loose shape check: something before the @, a dot somewhere after it, no
/// whitespace anywhere.
pub(crate) fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}

/// Validate the form and produce the writable draft on success.
pub(crate) fn validate_employee(
    form: &EmployeeFormData,
) -> Result<EmployeeDraft, EmployeeFormErrors> {
    let mut errors = EmployeeFormErrors::default();

    if form.name.trim().is_empty() {
        errors.name = Some("Name is required");
    }
    if form.email.trim().is_empty() {
        errors.email = Some("Email is required");
    } else if !is_valid_email(form.email.trim()) {
        errors.email = Some("Email is invalid");
    }
    if form.phone.trim().is_empty() {
        errors.phone = Some("Phone is required");
    }
    if form.department.is_empty() {
        errors.department = Some("Department is required");
    }
    if form.position.trim().is_empty() {
        errors.position = Some("Position is required");
    }

    let join_date = match NaiveDate::parse_from_str(&form.join_date, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            errors.join_date = Some("Join date is required");
            None
        }
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(EmployeeDraft {
        name: form.name.trim().to_string(),
        email: form.email.trim().to_string(),
        phone: form.phone.trim().to_string(),
        department: form.department.clone(),
        position: form.position.trim().to_string(),
        // Checked above.
        join_date: join_date.unwrap_or_default(),
        status: form.status,
    })
}

fn field_class(error: Option<&'static str>) -> &'static str {
    if error.is_some() {
        "input input-invalid"
    } else {
        "input"
    }
}

#[component]
fn FieldError(#[prop(into)] message: Signal<Option<&'static str>>) -> impl IntoView {
    view! {
        <Show when=move || message.get().is_some()>
            <p class="field-error">{move || message.get().unwrap_or_default()}</p>
        </Show>
    }
}

/// Shared employee form used by the add and edit modals.
#[component]
pub(crate) fn EmployeeFormFields(
    form: ReadSignal<EmployeeFormData>,
    set_form: WriteSignal<EmployeeFormData>,
    errors: ReadSignal<EmployeeFormErrors>,
    set_errors: WriteSignal<EmployeeFormErrors>,
) -> impl IntoView {
    view! {
        <div class="form-grid">
            <div class="form-field">
                <label for="employee-name">"Name"</label>
                <div class="input-with-icon">
                    <Icon name="user" size=16 />
                    <input
                        id="employee-name"
                        type="text"
                        placeholder="Full Name"
                        prop:value=move || form.get().name
                        class=move || field_class(errors.get().name)
                        on:input=move |ev| {
                            set_form.update(|f| f.name = event_target_value(&ev));
                            set_errors.update(|e| e.name = None);
                        }
                    />
                </div>
                <FieldError message=Signal::derive(move || errors.get().name) />
            </div>

            <div class="form-field">
                <label for="employee-email">"Email"</label>
                <div class="input-with-icon">
                    <Icon name="mail" size=16 />
                    <input
                        id="employee-email"
                        type="email"
                        placeholder="Email Address"
                        prop:value=move || form.get().email
                        class=move || field_class(errors.get().email)
                        on:input=move |ev| {
                            set_form.update(|f| f.email = event_target_value(&ev));
                            set_errors.update(|e| e.email = None);
                        }
                    />
                </div>
                <FieldError message=Signal::derive(move || errors.get().email) />
            </div>

            <div class="form-field">
                <label for="employee-phone">"Phone"</label>
                <div class="input-with-icon">
                    <Icon name="phone" size=16 />
                    <input
                        id="employee-phone"
                        type="tel"
                        placeholder="Phone Number"
                        prop:value=move || form.get().phone
                        class=move || field_class(errors.get().phone)
                        on:input=move |ev| {
                            set_form.update(|f| f.phone = event_target_value(&ev));
                            set_errors.update(|e| e.phone = None);
                        }
                    />
                </div>
                <FieldError message=Signal::derive(move || errors.get().phone) />
            </div>

            <div class="form-field">
                <label for="employee-department">"Department"</label>
                <div class="input-with-icon">
                    <Icon name="briefcase" size=16 />
                    <select
                        id="employee-department"
                        class=move || field_class(errors.get().department)
                        on:change=move |ev| {
                            set_form.update(|f| f.department = event_target_value(&ev));
                            set_errors.update(|e| e.department = None);
                        }
                    >
                        <option value="" selected=move || form.get().department.is_empty()>
                            "Select Department"
                        </option>
                        {DEPARTMENTS
                            .iter()
                            .map(|department| {
                                view! {
                                    <option
                                        value=*department
                                        selected=move || form.get().department == *department
                                    >
                                        {*department}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                </div>
                <FieldError message=Signal::derive(move || errors.get().department) />
            </div>

            <div class="form-field">
                <label for="employee-position">"Position"</label>
                <input
                    id="employee-position"
                    type="text"
                    placeholder="Job Position"
                    prop:value=move || form.get().position
                    class=move || field_class(errors.get().position)
                    on:input=move |ev| {
                        set_form.update(|f| f.position = event_target_value(&ev));
                        set_errors.update(|e| e.position = None);
                    }
                />
                <FieldError message=Signal::derive(move || errors.get().position) />
            </div>

            <div class="form-field">
                <label for="employee-join-date">"Join Date"</label>
                <div class="input-with-icon">
                    <Icon name="calendar" size=16 />
                    <input
                        id="employee-join-date"
                        type="date"
                        prop:value=move || form.get().join_date
                        class=move || field_class(errors.get().join_date)
                        on:input=move |ev| {
                            set_form.update(|f| f.join_date = event_target_value(&ev));
                            set_errors.update(|e| e.join_date = None);
                        }
                    />
                </div>
                <FieldError message=Signal::derive(move || errors.get().join_date) />
            </div>

            <div class="form-field">
                <label for="employee-status">"Status"</label>
                <select
                    id="employee-status"
                    class="input"
                    on:change=move |ev| {
                        if let Some(status) = EmployeeStatus::from_value(&event_target_value(&ev)) {
                            set_form.update(|f| f.status = status);
                        }
                    }
                >
                    {[EmployeeStatus::Active, EmployeeStatus::OnLeave]
                        .iter()
                        .map(|status| {
                            let value = status.as_str();
                            view! {
                                <option
                                    value=value
                                    selected=move || form.get().status.as_str() == value
                                >
                                    {status.label()}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> EmployeeFormData {
        EmployeeFormData {
            name: "Alex Morgan".to_string(),
            email: "alex.morgan@staffsphere.com".to_string(),
            phone: "(555) 123-4567".to_string(),
            department: "Human Resources".to_string(),
            position: "HR Manager".to_string(),
            join_date: "2020-03-15".to_string(),
            status: EmployeeStatus::Active,
        }
    }

    #[test]
    fn test_valid_form_produces_draft() {
        let draft = validate_employee(&filled()).unwrap();
        assert_eq!(draft.name, "Alex Morgan");
        assert_eq!(draft.join_date, NaiveDate::from_ymd_opt(2020, 3, 15).unwrap());
    }

    #[test]
    fn test_every_missing_field_is_flagged_at_once() {
        let errors = validate_employee(&EmployeeFormData::blank()).unwrap_err();
        assert!(errors.name.is_some());
        assert!(errors.email.is_some());
        assert!(errors.phone.is_some());
        assert!(errors.department.is_some());
        assert!(errors.position.is_some());
        assert!(errors.join_date.is_some());
    }

    #[test]
    fn test_malformed_email_is_rejected() {
        let mut form = filled();
        for bad in ["plain", "no-at.example.com", "two words@example.com", "user@nodot"] {
            form.email = bad.to_string();
            let errors = validate_employee(&form).unwrap_err();
            assert_eq!(errors.email, Some("Email is invalid"), "{bad}");
        }
    }

    #[test]
    fn test_email_shapes_accepted() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@sub.example.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@.com"));
    }

    #[test]
    fn test_form_seeds_from_employee() {
        let employee = Employee {
            id: "emp-1".to_string(),
            name: "Jordan Smith".to_string(),
            email: "jordan.smith@staffsphere.com".to_string(),
            phone: "(555) 234-5678".to_string(),
            department: "Engineering".to_string(),
            position: "Senior Developer".to_string(),
            join_date: NaiveDate::from_ymd_opt(2019, 6, 22).unwrap(),
            status: EmployeeStatus::OnLeave,
        };
        let form = EmployeeFormData::from_employee(&employee);
        assert_eq!(form.join_date, "2019-06-22");
        assert_eq!(form.status, EmployeeStatus::OnLeave);
    }
}
