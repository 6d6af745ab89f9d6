//! Employee service.
//!
//! Business rules sit here: authorization, validation, the email
//! uniqueness check and the mapping from storage outcomes to API errors.

use std::collections::HashSet;
use std::io::Read;

use ems_auth::{PasswordHasherService, MOCK_BEARER_TOKEN};
use ems_model::{EmployeeUpdate, NewEmployee};
use ems_storage::{EmployeeProvider, EmployeeSearchCriteria, StorageError};

use crate::access::{Endpoint, Principal};
use crate::dto::{EmployeeResponse, LoginRequest, LoginResponse};
use crate::error::{ApiError, ApiResult};

/// Employee service over a storage provider.
#[derive(Debug, Clone)]
pub struct EmployeeService<P> {
    employees: P,
}

impl<P: EmployeeProvider> EmployeeService<P> {
    /// Creates a service over an employee store.
    #[must_use]
    pub const fn new(employees: P) -> Self {
        Self { employees }
    }

    /// Gets the underlying employee store.
    #[must_use]
    pub const fn employees(&self) -> &P {
        &self.employees
    }

    /// Gets an employee by ID.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if no employee has the ID.
    pub async fn get_by_id(&self, caller: &Principal, id: i64) -> ApiResult<EmployeeResponse> {
        caller.authorize(Endpoint::GetEmployee)?;
        tracing::debug!(id, user = caller.username(), "Getting employee by ID");

        self.employees
            .get_by_id(id)
            .await?
            .map(EmployeeResponse::from)
            .ok_or(ApiError::NotFound(id))
    }

    /// Searches employees, most recently created first.
    ///
    /// Empty criteria return every employee.
    ///
    /// # Errors
    ///
    /// Returns an error if the caller may not read or the store fails.
    pub async fn search(
        &self,
        caller: &Principal,
        criteria: &EmployeeSearchCriteria,
    ) -> ApiResult<Vec<EmployeeResponse>> {
        caller.authorize(Endpoint::SearchEmployees)?;
        tracing::debug!(?criteria, user = caller.username(), "Searching employees");

        let employees = self.employees.search(criteria).await?;
        Ok(employees.into_iter().map(EmployeeResponse::from).collect())
    }

    /// Creates an employee and returns it as stored.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` for missing fields and
    /// `ApiError::BadRequest` if the email is taken.
    pub async fn create(
        &self,
        caller: &Principal,
        request: &NewEmployee,
    ) -> ApiResult<EmployeeResponse> {
        caller.authorize(Endpoint::CreateEmployee)?;
        self.insert(request).await
    }

    /// Creates several employees, skipping emails that already exist.
    ///
    /// Returns the employees actually created.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` if any request is invalid; nothing is
    /// created in that case.
    pub async fn create_many(
        &self,
        caller: &Principal,
        requests: &[NewEmployee],
    ) -> ApiResult<Vec<EmployeeResponse>> {
        caller.authorize(Endpoint::CreateEmployees)?;
        tracing::info!(count = requests.len(), user = caller.username(), "Creating employees");

        validate_all(requests)?;
        self.insert_many(requests).await
    }

    /// Imports employees from CSV and returns the ones created.
    ///
    /// The first row is a header. The columns are name, email, department,
    /// phone, password and role; rows with fewer columns are ignored, and
    /// emails already taken are skipped. Passwords are stored as Argon2
    /// hashes.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::BadRequest` if the CSV cannot be read and
    /// `ApiError::Validation` if a row is invalid; nothing is created in
    /// either case.
    pub async fn bulk_upload<R: Read>(
        &self,
        caller: &Principal,
        reader: R,
    ) -> ApiResult<Vec<EmployeeResponse>> {
        caller.authorize(Endpoint::UploadEmployees)?;
        tracing::info!(user = caller.username(), "Bulk uploading employees from CSV");

        let mut requests = parse_csv(reader)?;
        validate_all(&requests)?;

        let hasher = PasswordHasherService::with_defaults();
        for request in &mut requests {
            request.password = hasher
                .hash(&request.password)
                .map_err(|e| ApiError::Internal(e.to_string()))?;
        }

        let created = self.insert_many(&requests).await?;
        tracing::info!(count = created.len(), "Batch inserted employees from CSV");
        Ok(created)
    }

    /// Replaces an employee's profile, and its password when one is given.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if no employee has the ID and
    /// `ApiError::BadRequest` if the new email is taken.
    pub async fn update(
        &self,
        caller: &Principal,
        id: i64,
        update: &EmployeeUpdate,
    ) -> ApiResult<EmployeeResponse> {
        caller.authorize(Endpoint::UpdateEmployee)?;

        let violations = update.validate();
        if !violations.is_empty() {
            return Err(ApiError::Validation(violations));
        }

        let existing = self
            .employees
            .get_by_id(id)
            .await?
            .ok_or(ApiError::NotFound(id))?;

        if existing.email != update.email && self.employees.count_by_email(&update.email).await? > 0
        {
            return Err(duplicate_email(&update.email));
        }

        self.employees
            .update(id, update)
            .await
            .map_err(into_api_error)?;
        if let Some(password) = update.new_password() {
            self.employees
                .update_password(id, password)
                .await
                .map_err(into_api_error)?;
        }
        tracing::info!(id, user = caller.username(), "Updated employee");

        self.employees
            .get_by_id(id)
            .await?
            .map(EmployeeResponse::from)
            .ok_or(ApiError::NotFound(id))
    }

    /// Deletes an employee.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if no employee has the ID.
    pub async fn delete(&self, caller: &Principal, id: i64) -> ApiResult<()> {
        caller.authorize(Endpoint::DeleteEmployee)?;

        self.employees.delete(id).await.map_err(into_api_error)?;
        tracing::info!(id, user = caller.username(), "Deleted employee");
        Ok(())
    }

    /// Counts all employees.
    ///
    /// # Errors
    ///
    /// Returns an error if the caller may not read or the store fails.
    pub async fn count(&self, caller: &Principal) -> ApiResult<u64> {
        caller.authorize(Endpoint::SearchEmployees)?;
        Ok(self.employees.count().await?)
    }

    /// Lists the distinct role labels in use.
    ///
    /// # Errors
    ///
    /// Returns an error if the caller may not read or the store fails.
    pub async fn distinct_roles(&self, caller: &Principal) -> ApiResult<Vec<String>> {
        caller.authorize(Endpoint::SearchEmployees)?;
        Ok(self.employees.distinct_roles().await?)
    }

    /// Simulates the login endpoint.
    ///
    /// Any known email is answered with a mock bearer token; the password
    /// is not checked here (see the user storage provider for that).
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` if no employee has the email.
    pub async fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse> {
        tracing::info!(email = %request.email, "Login attempt");

        if self.employees.get_by_email(&request.email).await?.is_some() {
            tracing::info!(email = %request.email, "Login successful");
            Ok(LoginResponse::success(MOCK_BEARER_TOKEN))
        } else {
            tracing::warn!(email = %request.email, "Login failed");
            Err(ApiError::Unauthorized)
        }
    }

    async fn insert_many(&self, requests: &[NewEmployee]) -> ApiResult<Vec<EmployeeResponse>> {
        let mut seen = HashSet::new();
        let mut created = Vec::new();
        for request in requests {
            if !seen.insert(request.email.as_str())
                || self.employees.count_by_email(&request.email).await? > 0
            {
                tracing::warn!(email = %request.email, "Skipped employee with existing email");
                continue;
            }
            created.push(self.insert(request).await?);
        }

        tracing::info!(count = created.len(), "Batch inserted employees");
        Ok(created)
    }

    async fn insert(&self, request: &NewEmployee) -> ApiResult<EmployeeResponse> {
        let violations = request.validate();
        if !violations.is_empty() {
            return Err(ApiError::Validation(violations));
        }

        let id = self
            .employees
            .create(request)
            .await
            .map_err(into_api_error)?;
        tracing::info!(id, email = %request.email, "Created employee");

        self.employees
            .get_by_id(id)
            .await?
            .map(EmployeeResponse::from)
            .ok_or(ApiError::NotFound(id))
    }
}

/// Columns of an import row: name, email, department, phone, password, role.
const CSV_COLUMNS: usize = 6;

fn parse_csv<R: Read>(reader: R) -> ApiResult<Vec<NewEmployee>> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut requests = Vec::new();
    for record in csv.records() {
        let record = record.map_err(|e| ApiError::BadRequest(format!("CSV upload failed: {e}")))?;
        if record.len() < CSV_COLUMNS {
            tracing::debug!(
                line = record.position().map(csv::Position::line),
                columns = record.len(),
                "Ignored short CSV row"
            );
            continue;
        }

        let optional = |i: usize| record.get(i).filter(|v| !v.is_empty()).map(str::to_string);
        requests.push(NewEmployee {
            name: record[0].to_string(),
            email: record[1].to_string(),
            department: optional(2),
            phone: optional(3),
            password: record[4].to_string(),
            role: record[5].to_string(),
        });
    }
    Ok(requests)
}

fn validate_all(requests: &[NewEmployee]) -> ApiResult<()> {
    for request in requests {
        let violations = request.validate();
        if !violations.is_empty() {
            return Err(ApiError::Validation(violations));
        }
    }
    Ok(())
}

fn duplicate_email(email: &str) -> ApiError {
    ApiError::BadRequest(StorageError::duplicate("Employee", "email", email).to_string())
}

fn into_api_error(err: StorageError) -> ApiError {
    match err {
        StorageError::NotFound { id, .. } => ApiError::NotFound(id),
        StorageError::Duplicate { value, .. } => duplicate_email(&value),
        other => ApiError::Storage(other),
    }
}
