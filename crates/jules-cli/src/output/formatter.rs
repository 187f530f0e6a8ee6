use crate::output::table::print_table;
use anyhow::Result;
use jules_api::types::{
    Activity, ListActivitiesResponse, ListSessionsResponse, ListSourcesResponse, Session, Source,
};
use serde::Serialize;

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

fn repo_label(source: &Source) -> String {
    source
        .github_repo
        .as_ref()
        .map(|repo| format!("{}/{}", repo.owner, repo.repo))
        .unwrap_or_default()
}

// --- Source Formatters ---

pub fn print_sources_response(response: &ListSourcesResponse, format: &str) -> Result<()> {
    match format {
        "json" => print_json(response)?,
        _ => {
            let headers = vec!["ID", "Name", "Repository"];
            let rows: Vec<Vec<String>> = response
                .sources
                .iter()
                .map(|s| vec![s.id.clone(), s.name.clone(), repo_label(s)])
                .collect();
            print_table(headers, rows);
            if let Some(token) = &response.next_page_token {
                println!("\nNext page token: {}", token);
            }
        }
    }
    Ok(())
}

pub fn print_source(source: &Source, format: &str) -> Result<()> {
    match format {
        "json" => print_json(source)?,
        _ => {
            let headers = vec!["ID", "Name", "Repository"];
            let rows = vec![vec![
                source.id.clone(),
                source.name.clone(),
                repo_label(source),
            ]];
            print_table(headers, rows);
        }
    }
    Ok(())
}

// --- Session Formatters ---

pub fn print_sessions_response(response: &ListSessionsResponse, format: &str) -> Result<()> {
    match format {
        "json" => print_json(response)?,
        _ => {
            let headers = vec!["ID", "Title", "State", "Updated At"];
            let rows: Vec<Vec<String>> = response
                .sessions
                .iter()
                .map(|s| {
                    vec![
                        s.id.clone(),
                        s.title.clone().unwrap_or_else(|| s.prompt.clone()),
                        s.state.to_string(),
                        s.update_time.clone(),
                    ]
                })
                .collect();
            print_table(headers, rows);
            if let Some(token) = &response.next_page_token {
                println!("\nNext page token: {}", token);
            }
        }
    }
    Ok(())
}

pub fn print_session(session: &Session, format: &str) -> Result<()> {
    match format {
        "json" => print_json(session)?,
        _ => {
            let headers = vec!["ID", "State", "Source", "URL"];
            let rows = vec![vec![
                session.id.clone(),
                session.state.to_string(),
                session.source_context.source.clone(),
                session.url.clone(),
            ]];
            print_table(headers, rows);
        }
    }
    Ok(())
}

// --- Activity Formatters ---

pub fn print_activities_response(response: &ListActivitiesResponse, format: &str) -> Result<()> {
    match format {
        "json" => print_json(response)?,
        _ => {
            let headers = vec!["ID", "Type", "Created At", "Summary"];
            let rows: Vec<Vec<String>> = response
                .activities
                .iter()
                .map(activity_row)
                .collect();
            print_table(headers, rows);
            if let Some(token) = &response.next_page_token {
                println!("\nNext page token: {}", token);
            }
        }
    }
    Ok(())
}

pub fn print_activity(activity: &Activity, format: &str) -> Result<()> {
    match format {
        "json" => print_json(activity)?,
        _ => {
            let headers = vec!["ID", "Type", "Created At", "Summary"];
            print_table(headers, vec![activity_row(activity)]);
            for artifact in &activity.artifacts {
                println!("Artifact: {}", artifact.kind());
            }
        }
    }
    Ok(())
}

fn activity_row(activity: &Activity) -> Vec<String> {
    vec![
        activity.id.clone().unwrap_or_default(),
        activity.kind().to_string(),
        activity.create_time.clone().unwrap_or_default(),
        activity.summary().trim().to_string(),
    ]
}
