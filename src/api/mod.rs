pub mod activities;
pub mod client;
pub mod employees;
pub mod leaves;
pub mod stats;
pub mod store;
pub mod tasks;

#[cfg(test)]
pub mod testing;

use std::rc::Rc;

use leptos::{provide_context, use_context};

pub use activities::ActivityService;
pub use client::HttpRecordStore;
pub use employees::EmployeeService;
pub use leaves::LeaveRequestService;
pub use stats::DepartmentStatsService;
pub use store::{RecordStore, StoreError};
pub use tasks::TaskService;

/// All entity services, sharing one injected [`RecordStore`] adapter.
#[derive(Clone)]
pub struct Services {
    pub employees: EmployeeService,
    pub tasks: TaskService,
    pub leaves: LeaveRequestService,
    pub activities: ActivityService,
    pub stats: DepartmentStatsService,
}

impl Services {
    pub fn new(store: Rc<dyn RecordStore>) -> Self {
        Self {
            employees: EmployeeService::new(store.clone()),
            tasks: TaskService::new(store.clone()),
            leaves: LeaveRequestService::new(store.clone()),
            activities: ActivityService::new(store.clone()),
            stats: DepartmentStatsService::new(store),
        }
    }
}

/// Provide the service layer to the component tree. Call once at the root.
pub fn provide_services(store: Rc<dyn RecordStore>) {
    provide_context(Services::new(store));
}

/// Hook to access the service layer.
pub fn use_services() -> Services {
    use_context::<Services>().expect("Services must be provided by the app root")
}
