//! Employee API simulation.
//!
//! Drives [`EmployeeService`] through the calls a REST client would make
//! and records the responses it would have received.

use ems_api::{ApiError, ApiResponse, EmployeeService, LoginRequest, Principal};
use ems_model::{roles, NewEmployee};
use ems_storage::{EmployeeProvider, EmployeeSearchCriteria};
use http::StatusCode;

use super::{or_dash, pretty_json, SimulationReport, Step};

/// Report title.
pub const TITLE: &str = "🧪 EMPLOYEE MANAGEMENT SYSTEM - API SIMULATION TESTS";

/// Employee looked up in the first step.
const LOOKUP_ID: i64 = 1;

/// Search results listed in the unfiltered search step.
const SEARCH_PREVIEW: usize = 2;

/// Department used by the filtered search step.
const FILTER_DEPARTMENT: &str = "IT";

/// Credentials posted to the login endpoint.
const LOGIN_EMAIL: &str = "user2@company.com";
const LOGIN_PASSWORD: &str = "password123";

/// The employee the create steps post.
#[must_use]
pub fn api_test_user() -> NewEmployee {
    NewEmployee::new(
        "API Test User",
        "api.test@company.com",
        "$2a$10$hashed.password.here",
        roles::EMPLOYEE,
    )
    .with_phone("5551234567")
    .with_department("QA")
}

/// Runs the API simulation as `caller`.
pub async fn run<P: EmployeeProvider>(
    service: &EmployeeService<P>,
    caller: &Principal,
) -> SimulationReport {
    let mut report = SimulationReport::new(TITLE);
    report.push(get_employee(service, caller).await);
    report.push(search_all(service, caller).await);
    report.push(search_department(service, caller).await);

    let new_employee = api_test_user();
    report.push(create_employee(service, caller, &new_employee).await);
    report.push(create_duplicate(service, caller, &new_employee).await);
    report.push(login(service).await);
    report
}

async fn get_employee<P: EmployeeProvider>(
    service: &EmployeeService<P>,
    caller: &Principal,
) -> Step {
    let mut step = Step::new(format!("GET /api/employees/{LOOKUP_ID}"));
    match service.get_by_id(caller, LOOKUP_ID).await {
        Ok(employee) => {
            step.status(StatusCode::OK, true)
                .check(format!("Response: {}", pretty_json(&employee)));
        }
        Err(err) => record_error(&mut step, &err),
    }
    step
}

async fn search_all<P: EmployeeProvider>(
    service: &EmployeeService<P>,
    caller: &Principal,
) -> Step {
    let mut step = Step::new("GET /api/employees/search");
    match service.search(caller, &EmployeeSearchCriteria::new()).await {
        Ok(employees) => {
            step.status(StatusCode::OK, true)
                .check(format!("Response: Found {} employees", employees.len()));
            for employee in employees.iter().take(SEARCH_PREVIEW) {
                step.detail(format!(
                    "- {} ({}) - {}",
                    employee.name,
                    employee.email,
                    or_dash(employee.department.as_deref())
                ));
            }
        }
        Err(err) => record_error(&mut step, &err),
    }
    step
}

async fn search_department<P: EmployeeProvider>(
    service: &EmployeeService<P>,
    caller: &Principal,
) -> Step {
    let mut step = Step::new(format!(
        "GET /api/employees/search?department={FILTER_DEPARTMENT}"
    ));
    let criteria = EmployeeSearchCriteria::new().department(FILTER_DEPARTMENT);
    match service.search(caller, &criteria).await {
        Ok(employees) => {
            step.status(StatusCode::OK, true).check(format!(
                "Response: Found {} {FILTER_DEPARTMENT} employees",
                employees.len()
            ));
            for employee in &employees {
                step.detail(format!(
                    "- {} ({})",
                    employee.name,
                    or_dash(employee.department.as_deref())
                ));
            }
        }
        Err(err) => record_error(&mut step, &err),
    }
    step
}

async fn create_employee<P: EmployeeProvider>(
    service: &EmployeeService<P>,
    caller: &Principal,
    new_employee: &NewEmployee,
) -> Step {
    let mut step = Step::new("POST /api/employees/add");
    match service.create(caller, new_employee).await {
        Ok(created) => {
            let response = ApiResponse::created(created, "Employee created successfully");
            step.status(StatusCode::CREATED, true)
                .check(format!("Response: {}", pretty_json(&response)));
        }
        Err(err) => record_error(&mut step, &err),
    }
    step
}

async fn create_duplicate<P: EmployeeProvider>(
    service: &EmployeeService<P>,
    caller: &Principal,
    new_employee: &NewEmployee,
) -> Step {
    let mut step = Step::new("POST /api/employees/add (Duplicate Email)");
    match service.create(caller, new_employee).await {
        Ok(_) => {
            step.cross("Should have failed!");
        }
        Err(err) if err.status_code() == StatusCode::BAD_REQUEST => {
            step.status(StatusCode::BAD_REQUEST, true)
                .check(format!("Expected Error: {err}"));
        }
        Err(err) => record_error(&mut step, &err),
    }
    step
}

async fn login<P: EmployeeProvider>(service: &EmployeeService<P>) -> Step {
    let mut step = Step::new("POST /api/auth/login (Simulation)");
    let request = LoginRequest::new(LOGIN_EMAIL, LOGIN_PASSWORD);
    match service.login(&request).await {
        Ok(response) => {
            step.status(StatusCode::OK, true)
                .check(format!("Response: {}", pretty_json(&response)));
        }
        Err(ApiError::Unauthorized) => {
            step.status(StatusCode::UNAUTHORIZED, false);
        }
        Err(err) => record_error(&mut step, &err),
    }
    step
}

fn record_error(step: &mut Step, err: &ApiError) {
    step.status(err.status_code(), false);
    if !matches!(err, ApiError::NotFound(_)) {
        step.cross(format!("Error: {err}"))
            .detail(format!("Response: {}", pretty_json(&err.to_response())));
    }
}
