//! Server-rendered pages. Rendering is deliberately minimal: every page is
//! assembled by a plain function behind one shared layout. Credentials are
//! never interpolated into a page.

use actix_web_flash_messages::{IncomingFlashMessages, Level};

use crate::github::types::{Contributor, Repository, Stargazer};

/// Escape text for interpolation into HTML
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn flash_block(messages: &IncomingFlashMessages) -> String {
    let mut block = String::new();
    for message in messages.iter() {
        let class = match message.level() {
            Level::Error | Level::Warning => "flash flash-error",
            _ => "flash flash-success",
        };
        block.push_str(&format!(
            "<p class=\"{}\">{}</p>\n",
            class,
            escape(message.content())
        ));
    }
    block
}

fn layout(title: &str, messages: &IncomingFlashMessages, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{title} | gh-console</title></head>\n<body>\n\
         <nav><a href=\"/\">Home</a> | <a href=\"/options\">Menu</a> | <a href=\"/login\">Login</a> | <a href=\"/logout\">Logout</a></nav>\n\
         {flash}<h1>{title}</h1>\n{body}\n</body>\n</html>\n",
        title = escape(title),
        flash = flash_block(messages),
        body = body,
    )
}

/// One input of a rendered form
pub struct Field {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

pub enum FieldKind {
    Text,
    Password,
    /// public/private selector
    Visibility,
}

impl Field {
    pub const fn text(name: &'static str, label: &'static str) -> Self {
        Field {
            name,
            label,
            kind: FieldKind::Text,
        }
    }

    pub const fn password(name: &'static str, label: &'static str) -> Self {
        Field {
            name,
            label,
            kind: FieldKind::Password,
        }
    }
}

/// Render a one-form page posting to `action`. Password/token inputs always
/// start empty; nothing submitted is ever echoed back.
pub fn form_page(
    title: &str,
    action: &str,
    fields: &[Field],
    submit: &str,
    messages: &IncomingFlashMessages,
) -> String {
    let mut body = format!("<form method=\"post\" action=\"{}\">\n", escape(action));
    for field in fields {
        match field.kind {
            FieldKind::Text => body.push_str(&format!(
                "<label>{label} <input type=\"text\" name=\"{name}\"></label><br>\n",
                label = escape(field.label),
                name = field.name,
            )),
            FieldKind::Password => body.push_str(&format!(
                "<label>{label} <input type=\"password\" name=\"{name}\" autocomplete=\"off\"></label><br>\n",
                label = escape(field.label),
                name = field.name,
            )),
            FieldKind::Visibility => body.push_str(&format!(
                "<label>{label} <select name=\"{name}\">\
                 <option value=\"public\">public</option>\
                 <option value=\"private\">private</option>\
                 </select></label><br>\n",
                label = escape(field.label),
                name = field.name,
            )),
        }
    }
    body.push_str(&format!(
        "<button type=\"submit\">{}</button>\n</form>",
        escape(submit)
    ));
    layout(title, messages, &body)
}

pub fn home_page(messages: &IncomingFlashMessages) -> String {
    let body = "<p>A small console for your GitHub repositories.</p>\n\
                <ul>\n\
                <li><a href=\"/register\">Register</a></li>\n\
                <li><a href=\"/login\">Login</a></li>\n\
                <li><a href=\"/options\">Menu</a></li>\n\
                </ul>";
    layout("Welcome", messages, body)
}

pub fn options_page(username: &str, messages: &IncomingFlashMessages) -> String {
    let body = format!(
        "<p>Signed in as <strong>{}</strong>.</p>\n\
         <ul>\n\
         <li><a href=\"/create\">Create a repository</a></li>\n\
         <li><a href=\"/repo_list\">List repositories</a></li>\n\
         <li><a href=\"/contri_list\">Contributors and stargazers</a></li>\n\
         <li><a href=\"/list_topic\">List topics</a></li>\n\
         <li><a href=\"/update_topic\">Add a topic</a></li>\n\
         <li><a href=\"/delete_topic\">Delete a topic</a></li>\n\
         <li><a href=\"/count\">Popular repositories</a></li>\n\
         </ul>",
        escape(username)
    );
    layout("Menu", messages, &body)
}

/// Repository table, shared by /show, /count and the blank-username
/// fallbacks. `notice` renders inline on the same response.
pub fn repo_list_page(
    username: &str,
    repos: &[Repository],
    notice: Option<&str>,
    messages: &IncomingFlashMessages,
) -> String {
    let mut body = String::new();
    if let Some(notice) = notice {
        body.push_str(&format!(
            "<p class=\"flash flash-error\">{}</p>\n",
            escape(notice)
        ));
    }
    body.push_str(&format!(
        "<p>Repositories of <strong>{}</strong>:</p>\n",
        escape(username)
    ));
    if repos.is_empty() {
        body.push_str("<p>No repositories found.</p>");
    } else {
        body.push_str(
            "<table>\n<tr><th>Name</th><th>Description</th><th>Stars</th><th>Forks</th><th>Visibility</th></tr>\n",
        );
        for repo in repos {
            body.push_str(&format!(
                "<tr><td><a href=\"{url}\">{name}</a></td><td>{description}</td><td>{stars}</td><td>{forks}</td><td>{visibility}</td></tr>\n",
                url = escape(&repo.html_url),
                name = escape(&repo.full_name),
                description = escape(repo.description.as_deref().unwrap_or("")),
                stars = repo.stargazers_count,
                forks = repo.forks_count,
                visibility = if repo.private { "private" } else { "public" },
            ));
        }
        body.push_str("</table>");
    }
    layout("Repositories", messages, &body)
}

pub fn contributors_page(
    owner: &str,
    repo_name: &str,
    contributors: &[Contributor],
    stargazers: &[Stargazer],
    messages: &IncomingFlashMessages,
) -> String {
    let mut body = format!(
        "<h2>Contributors of {owner}/{repo}</h2>\n<ul>\n",
        owner = escape(owner),
        repo = escape(repo_name),
    );
    for contributor in contributors {
        body.push_str(&format!(
            "<li><a href=\"{url}\">{login}</a> ({contributions} commits)</li>\n",
            url = escape(&contributor.html_url),
            login = escape(&contributor.login),
            contributions = contributor.contributions,
        ));
    }
    body.push_str("</ul>\n<h2>Stargazers</h2>\n<ul>\n");
    for stargazer in stargazers {
        body.push_str(&format!(
            "<li><a href=\"{url}\">{login}</a></li>\n",
            url = escape(&stargazer.html_url),
            login = escape(&stargazer.login),
        ));
    }
    body.push_str("</ul>");
    layout("Contributors and stargazers", messages, &body)
}

pub fn topics_page(repo_name: &str, names: &[String], messages: &IncomingFlashMessages) -> String {
    let mut body = format!("<h2>Topics of {}</h2>\n", escape(repo_name));
    if names.is_empty() {
        body.push_str("<p>No topics set.</p>");
    } else {
        body.push_str("<ul>\n");
        for name in names {
            body.push_str(&format!("<li>{}</li>\n", escape(name)));
        }
        body.push_str("</ul>");
    }
    layout("Topics", messages, &body)
}
