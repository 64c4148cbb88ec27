//! The `get` subcommand: resolve a resource argument and render the result.
//!
//! Listings of organizations and projects are sorted before printing;
//! issue listings and search results stay in the order the API returned
//! them. In raw-JSON mode the gateway streams the response to stdout and
//! the renderers here have nothing to do.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde_json::{Map, Value};
use sntr_api::{Client, Options, schema};
use sntr_config::Config;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::api_client;
use crate::error::{CliError, Result};
use crate::resolve::{Resource, classify};

/// Fixed projection and ordering for the search endpoint.
const SEARCH_FIELDS: &str = "field=project&field=timestamp&field=title&sort=-timestamp";

/// Query-string escaping: RFC 3986 unreserved characters pass through,
/// everything else is percent-encoded.
const QUERY_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Runs the `get` subcommand.
///
/// With a search query the resource argument is taken as an organization
/// slug and the discovery endpoint is called; otherwise the argument is
/// classified and dispatched. Classification happens before any client is
/// built, so unusable input never causes a network call.
///
/// # Errors
///
/// [`CliError::Usage`] for missing or unrecognized arguments,
/// [`CliError::MissingToken`] without a configured token, and any gateway
/// error otherwise.
pub async fn run(
    config: &Config,
    resource: Option<&str>,
    query: Option<&str>,
    options: Options,
) -> Result<()> {
    if let Some(query) = query {
        let Some(organization) = resource else {
            return Err(CliError::Usage(
                "missing organization slug for search".to_string(),
            ));
        };
        let client = api_client(config, options)?;
        return search_events(&client, organization, query).await;
    }

    let Some(argument) = resource else {
        return Err(CliError::Usage("missing resource type".to_string()));
    };
    let resource = classify(argument)
        .ok_or_else(|| CliError::Usage(format!("unknown resource: {argument}")))?;
    let client = api_client(config, options)?;
    dispatch(&client, resource).await
}

/// Executes a classified resource request against the gateway.
pub async fn dispatch(client: &Client, resource: Resource) -> Result<()> {
    match resource {
        Resource::Organizations => list_organizations(client).await,
        Resource::Projects => list_projects(client).await,
        Resource::OrganizationProjects { organization } => {
            list_organization_projects(client, &organization).await
        }
        Resource::OrganizationEvent {
            organization,
            event,
        } => Ok(show_organization_event(client, &organization, &event).await?),
        Resource::ProjectEvent {
            organization,
            project,
            event,
        } => show_project_event(client, &organization, &project, &event).await,
        Resource::ProjectIssues {
            organization,
            project,
        } => list_project_issues(client, &organization, &project).await,
    }
}

async fn list_organizations(client: &Client) -> Result<()> {
    let Some(organizations) = client.get_multiple("organizations").await? else {
        return Ok(());
    };
    let mut slugs: Vec<String> = organizations
        .iter()
        .map(|org| schema::string_field(org, "slug", "organization").map(ToString::to_string))
        .collect::<sntr_api::Result<_>>()?;
    slugs.sort();
    for slug in &slugs {
        println!("{slug}");
    }
    Ok(())
}

async fn list_projects(client: &Client) -> Result<()> {
    let Some(projects) = client.get_multiple("projects").await? else {
        return Ok(());
    };
    let mut rows = Vec::with_capacity(projects.len());
    for project in &projects {
        let organization = schema::object(
            schema::field(project, "organization", "project")?,
            "project.organization",
        )?;
        rows.push((
            schema::string_field(organization, "slug", "project.organization")?.to_string(),
            schema::string_field(project, "slug", "project")?.to_string(),
        ));
    }
    // Tuple sort keys on organization slug then project slug, so a slug
    // containing `/` cannot corrupt the order.
    rows.sort();
    for (organization, project) in &rows {
        println!("{organization}/{project}");
    }
    Ok(())
}

async fn list_organization_projects(client: &Client, organization: &str) -> Result<()> {
    let path = format!("organizations/{organization}/projects");
    let Some(projects) = client.get_multiple(&path).await? else {
        return Ok(());
    };
    let mut slugs: Vec<String> = projects
        .iter()
        .map(|project| schema::string_field(project, "slug", "project").map(ToString::to_string))
        .collect::<sntr_api::Result<_>>()?;
    slugs.sort();
    for slug in &slugs {
        println!("{organization}/{slug}");
    }
    Ok(())
}

async fn list_project_issues(client: &Client, organization: &str, project: &str) -> Result<()> {
    let path = format!("projects/{organization}/{project}/issues");
    let Some(issues) = client.get_multiple(&path).await? else {
        return Ok(());
    };
    for issue in &issues {
        let short_id = schema::string_field(issue, "shortId", "issue")?;
        let title = schema::string_field(issue, "title", "issue")?;
        println!("{short_id}: {title}");
    }
    Ok(())
}

/// Fetches and prints an organization-scoped event.
///
/// Returns the gateway's error type directly so that event lookback can
/// retry it on 404.
pub(crate) async fn show_organization_event(
    client: &Client,
    organization: &str,
    event: &str,
) -> sntr_api::Result<()> {
    let path = format!("organizations/{organization}/eventids/{event}");
    let Some(body) = client.get_single(&path).await? else {
        return Ok(());
    };
    let event_object = schema::object(schema::field(&body, "event", "event response")?, "event")?;
    println!("{}", event_summary(event, event_object));
    Ok(())
}

async fn show_project_event(
    client: &Client,
    organization: &str,
    project: &str,
    event: &str,
) -> Result<()> {
    let path = format!("projects/{organization}/{project}/events/{event}");
    let Some(event_object) = client.get_single(&path).await? else {
        return Ok(());
    };
    println!("{}", event_summary(event, &event_object));
    Ok(())
}

/// One line per event: its id and the sorted list of top-level keys.
fn event_summary(id: &str, event: &Map<String, Value>) -> String {
    let mut keys: Vec<&str> = event.keys().map(String::as_str).collect();
    keys.sort_unstable();
    format!("{id}: {}", keys.join(", "))
}

async fn search_events(client: &Client, organization: &str, query: &str) -> Result<()> {
    let encoded = utf8_percent_encode(query, QUERY_ESCAPE);
    let path = format!("organizations/{organization}/eventsv2/?query={encoded}&{SEARCH_FIELDS}");
    let Some(body) = client.get_single(&path).await? else {
        return Ok(());
    };
    println!("{}", search_table(&body)?);
    Ok(())
}

/// Renders search results as a blank-styled table, one row per event, in
/// the order the API returned them.
fn search_table(body: &Map<String, Value>) -> sntr_api::Result<String> {
    let data = schema::array(schema::field(body, "data", "search response")?, "search data")?;
    let mut builder = Builder::default();
    builder.push_record(["ID", "PROJECT", "TIMESTAMP", "EVENT TITLE"]);
    for entry in data {
        let event = schema::object(entry, "search result")?;
        builder.push_record([
            schema::string_field(event, "id", "search result")?,
            schema::string_field(event, "project", "search result")?,
            schema::string_field(event, "timestamp", "search result")?,
            schema::string_field(event, "title", "search result")?,
        ]);
    }
    let mut table = builder.build();
    table.with(Style::blank());
    Ok(table.to_string())
}
