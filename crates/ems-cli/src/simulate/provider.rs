//! User storage provider simulation.
//!
//! Exercises the provider the way the identity server would during a
//! login: lookup, credential checks, role mapping and the final claims.

use ems_auth::{AuthError, AuthenticatedSession, EmployeeUserStorageProvider, UserAttributes};
use ems_storage::EmployeeProvider;

use super::{bracketed, or_dash, SimulationReport, Step};

/// Report title.
pub const TITLE: &str = "🔐 KEYCLOAK CUSTOM PROVIDER - JDBC FUNCTIONALITY TESTS";

const KNOWN_EMAIL: &str = "user2@company.com";
const KNOWN_PASSWORD: &str = "password123";
const UNKNOWN_EMAIL: &str = "nonexistent@test.com";

/// Password checks as (email, candidate, expected result).
const PASSWORD_CASES: [(&str, &str, bool); 3] = [
    (KNOWN_EMAIL, KNOWN_PASSWORD, true),
    (KNOWN_EMAIL, "wrongpassword", false),
    (UNKNOWN_EMAIL, "anypassword", false),
];

/// Existence checks as (email, expected to exist).
const EXISTENCE_CASES: [(&str, bool); 3] = [
    (KNOWN_EMAIL, true),
    ("sarah@company.com", true),
    (UNKNOWN_EMAIL, false),
];

/// Runs the provider simulation.
pub async fn run<P: EmployeeProvider>(
    provider: &EmployeeUserStorageProvider<P>,
) -> SimulationReport {
    let mut report = SimulationReport::new(TITLE);
    report.push(lookup(provider).await);
    report.push(password_validation(provider).await);
    report.push(email_existence(provider).await);
    report.push(role_mapping(provider).await);
    report.push(authentication_flow(provider).await);
    report
}

async fn lookup<P: EmployeeProvider>(provider: &EmployeeUserStorageProvider<P>) -> Step {
    let mut step = Step::new("User Lookup by Email");
    match provider.find_by_email(KNOWN_EMAIL).await {
        Ok(Some(employee)) => {
            let permissions = ems_auth::map_role_to_permissions(&employee.role);
            step.check("User Found")
                .detail(format!("Name: {}", employee.name))
                .detail(format!("Email: {}", employee.email))
                .detail(format!("Role: {}", employee.role))
                .detail(format!(
                    "Department: {}",
                    or_dash(employee.department.as_deref())
                ))
                .detail(format!("Mapped Keycloak Roles: {}", bracketed(&permissions)));
        }
        Ok(None) => {
            step.cross("User Not Found");
        }
        Err(err) => {
            step.cross(format!("Error: {err}"));
        }
    }
    step
}

async fn password_validation<P: EmployeeProvider>(
    provider: &EmployeeUserStorageProvider<P>,
) -> Step {
    let mut step = Step::new("Password Validation");
    for (email, candidate, expected) in PASSWORD_CASES {
        match provider.validate_password(email, candidate).await {
            Ok(result) => {
                let verdict = if result == expected {
                    "✅ PASS"
                } else {
                    step.fail();
                    "❌ FAIL"
                };
                step.detail(format!("{verdict} - {email} with '{candidate}': {result}"));
            }
            Err(err) => {
                step.fail()
                    .detail(format!("❌ FAIL - {email} with '{candidate}': {err}"));
            }
        }
    }
    step
}

async fn email_existence<P: EmployeeProvider>(provider: &EmployeeUserStorageProvider<P>) -> Step {
    let mut step = Step::new("Email Existence Check");
    for (email, expected) in EXISTENCE_CASES {
        match provider.count_by_email(email).await {
            Ok(count) => {
                let exists = count > 0;
                if exists != expected {
                    step.fail();
                }
                let (mark, label) = if exists {
                    ("✅", "Exists")
                } else {
                    ("❌", "Not Found")
                };
                step.detail(format!("{mark} {email}: {label}"));
            }
            Err(err) => {
                step.fail().detail(format!("❌ {email}: {err}"));
            }
        }
    }
    step
}

async fn role_mapping<P: EmployeeProvider>(provider: &EmployeeUserStorageProvider<P>) -> Step {
    let mut step = Step::new("Role Mapping for All Users");
    match provider.role_mappings().await {
        Ok(mappings) => {
            for (role, permissions) in mappings {
                step.detail(format!("{role} → {}", bracketed(&permissions)));
            }
        }
        Err(err) => {
            step.cross(format!("Error: {err}"));
        }
    }
    step
}

async fn authentication_flow<P: EmployeeProvider>(
    provider: &EmployeeUserStorageProvider<P>,
) -> Step {
    let mut step = Step::new("Simulated Keycloak Authentication Flow");
    match provider.authenticate(KNOWN_EMAIL, KNOWN_PASSWORD).await {
        Ok(session) => record_session(&mut step, &session),
        Err(err @ (AuthError::UserNotFound | AuthError::InvalidCredentials)) => {
            step.cross(format!("Authentication Failed: {err}"));
        }
        Err(err) => {
            step.cross(format!("Error: {err}"));
        }
    }
    step
}

fn record_session(step: &mut Step, session: &AuthenticatedSession) {
    step.check("Authentication Successful")
        .detail("User Attributes for Keycloak:");
    for (key, value) in attribute_lines(&session.attributes) {
        step.detail(format!("  {key}: {value}"));
    }

    step.raw("").detail("Expected JWT Claims:");
    match session.claims.to_pretty_json() {
        Ok(json) => {
            step.raw(json);
        }
        Err(err) => {
            step.cross(format!("Error: {err}"));
        }
    }
}

/// Lists the attributes in the order the identity server shows them.
fn attribute_lines(attributes: &UserAttributes) -> [(&'static str, String); 7] {
    [
        ("username", attributes.username.clone()),
        ("email", attributes.email.clone()),
        ("firstName", attributes.first_name.clone()),
        ("lastName", attributes.last_name.clone()),
        (
            "department",
            or_dash(attributes.department.as_deref()).to_string(),
        ),
        ("phone", or_dash(attributes.phone.as_deref()).to_string()),
        ("roles", bracketed(&attributes.roles)),
    ]
}

#[cfg(test)]
mod tests {
    use ems_auth::{HashedPasswordMode, ProviderConfig};
    use ems_storage_sql::{SqliteStore, StoreConfig};

    use super::*;

    async fn store() -> (tempfile::TempDir, SqliteStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteStore::open(&StoreConfig::new(dir.path().join("sim.sqlite")))
            .await
            .unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn simulated_mode_passes_every_step() {
        let (_dir, store) = store().await;
        let provider = EmployeeUserStorageProvider::new(store.employees(), ProviderConfig::default());

        let report = run(&provider).await;
        assert!(report.passed(), "failed steps: {:?}", report.failures());
        assert_eq!(report.steps.len(), 5);

        let text = report.render();
        assert!(text.contains("   Name: Michael Johnson"));
        assert!(text.contains("Mapped Keycloak Roles: [READ_EMPLOYEES]"));
        assert!(text.contains("✅ PASS - user2@company.com with 'password123': true"));
        assert!(text.contains("❌ nonexistent@test.com: Not Found"));
        assert!(text.contains("ADMIN → [FULL_ACCESS]"));
        assert!(text.contains("     firstName: Michael"));
        assert!(text.contains("     lastName: Johnson"));
        assert!(text.contains("\"employee-api-client\""));

        store.close().await;
    }

    #[tokio::test]
    async fn bcrypt_mode_rejects_the_placeholder_hash() {
        let (_dir, store) = store().await;
        let config = ProviderConfig::default().password_mode(HashedPasswordMode::Bcrypt);
        let provider = EmployeeUserStorageProvider::new(store.employees(), config);

        let report = run(&provider).await;
        assert_eq!(
            report.failures(),
            vec!["Password Validation", "Simulated Keycloak Authentication Flow"]
        );
        assert!(report
            .render()
            .contains("❌ Authentication Failed: Invalid password"));
    }
}
