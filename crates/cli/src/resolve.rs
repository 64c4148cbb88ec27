//! Resource identifier classification.
//!
//! A single free-form argument like `acme/backend` or
//! `acme/0123456789abcdef0123456789abcdef` is classified into a typed
//! [`Resource`] by an ordered table of matchers. Ordering is significant
//! because the shapes overlap: a two-segment argument is an event lookup
//! when the second segment is a 32-hex-digit event id, and an issue
//! listing otherwise. First match wins; no match means the argument is
//! unusable and the caller reports a usage error without touching the
//! network.

/// Keywords that list all organizations.
const ORGANIZATION_KEYWORDS: [&str; 4] = ["organization", "organizations", "org", "orgs"];

/// Keywords that list all projects.
const PROJECT_KEYWORDS: [&str; 4] = ["project", "projects", "proj", "projs"];

/// A classified resource request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    /// List all organizations the token can see.
    Organizations,
    /// List all projects, annotated with their owning organization.
    Projects,
    /// List the projects under one organization.
    OrganizationProjects {
        /// Organization slug.
        organization: String,
    },
    /// Fetch a single event by organization and event id.
    OrganizationEvent {
        /// Organization slug.
        organization: String,
        /// 32-hex-digit event id.
        event: String,
    },
    /// Fetch a single event by organization, project, and event id.
    ProjectEvent {
        /// Organization slug.
        organization: String,
        /// Project slug.
        project: String,
        /// 32-hex-digit event id.
        event: String,
    },
    /// List the issues of a project.
    ProjectIssues {
        /// Organization slug.
        organization: String,
        /// Project slug.
        project: String,
    },
}

type Matcher = fn(&str) -> Option<Resource>;

/// The classification table, evaluated top to bottom. The event-id shapes
/// must come before the generic two- and three-segment fallbacks.
const MATCHERS: [Matcher; 6] = [
    match_organizations_keyword,
    match_projects_keyword,
    match_organization_projects,
    match_organization_event,
    match_project_event,
    match_project_issues,
];

/// Classifies a resource argument, or returns `None` if no shape matches.
///
/// # Examples
///
/// ```
/// use sntr_cli::resolve::{Resource, classify};
///
/// assert_eq!(classify("orgs"), Some(Resource::Organizations));
/// assert_eq!(
///     classify("acme/backend"),
///     Some(Resource::ProjectIssues {
///         organization: "acme".to_string(),
///         project: "backend".to_string(),
///     })
/// );
/// assert_eq!(classify("???"), None);
/// ```
#[must_use]
pub fn classify(argument: &str) -> Option<Resource> {
    MATCHERS.iter().find_map(|matcher| matcher(argument))
}

/// Returns whether a segment is a 32-hex-digit event id.
fn is_event_id(segment: &str) -> bool {
    segment.len() == 32 && segment.bytes().all(|b| b.is_ascii_hexdigit())
}

fn match_organizations_keyword(argument: &str) -> Option<Resource> {
    ORGANIZATION_KEYWORDS
        .contains(&argument)
        .then_some(Resource::Organizations)
}

fn match_projects_keyword(argument: &str) -> Option<Resource> {
    PROJECT_KEYWORDS.contains(&argument).then_some(Resource::Projects)
}

/// `org[anization][s]/<slug>/projects`
fn match_organization_projects(argument: &str) -> Option<Resource> {
    match argument.split('/').collect::<Vec<_>>()[..] {
        [prefix, slug, "projects"]
            if ORGANIZATION_KEYWORDS.contains(&prefix) && !slug.is_empty() =>
        {
            Some(Resource::OrganizationProjects {
                organization: slug.to_string(),
            })
        }
        _ => None,
    }
}

/// `<org>/<32-hex event id>`
fn match_organization_event(argument: &str) -> Option<Resource> {
    match argument.split('/').collect::<Vec<_>>()[..] {
        [organization, event] if !organization.is_empty() && is_event_id(event) => {
            Some(Resource::OrganizationEvent {
                organization: organization.to_string(),
                event: event.to_string(),
            })
        }
        _ => None,
    }
}

/// `<org>/<proj>/<32-hex event id>`
fn match_project_event(argument: &str) -> Option<Resource> {
    match argument.split('/').collect::<Vec<_>>()[..] {
        [organization, project, event]
            if !organization.is_empty() && !project.is_empty() && is_event_id(event) =>
        {
            Some(Resource::ProjectEvent {
                organization: organization.to_string(),
                project: project.to_string(),
                event: event.to_string(),
            })
        }
        _ => None,
    }
}

/// `<org>/<proj>` — the generic two-segment fallback.
fn match_project_issues(argument: &str) -> Option<Resource> {
    match argument.split('/').collect::<Vec<_>>()[..] {
        [organization, project] if !organization.is_empty() && !project.is_empty() => {
            Some(Resource::ProjectIssues {
                organization: organization.to_string(),
                project: project.to_string(),
            })
        }
        _ => None,
    }
}
