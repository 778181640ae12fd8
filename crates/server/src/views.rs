//! HTML views. One function per page, each taking the data bag its handler
//! assembled. Every interpolated value goes through [`escape`].

use axum::response::Html;
use serde_json::Value;
use std::fmt::Write;
use wildseries_core::model::{
    Actor, Category, CommentWithAuthor, Episode, Program, Season,
};

use crate::forms::{CategoryForm, CommentForm, field_errors};
use crate::routes::{actor_path, category_path, episode_path, program_path, season_path};

pub struct CategoryAddPage<'a> {
    pub form: &'a CategoryForm,
    pub errors: Option<&'a Value>,
    pub message: &'a str,
}

pub struct LoginPage<'a> {
    pub username: &'a str,
    pub error: Option<&'a str>,
}

pub struct IndexPage<'a> {
    pub programs: &'a [Program],
    pub categories: &'a [Category],
    pub search: Option<&'a str>,
}

pub struct ShowPage<'a> {
    pub program: &'a Program,
    pub seasons: &'a [Season],
    pub actors: &'a [Actor],
}

pub struct CategoryPage<'a> {
    pub category: &'a Category,
    pub programs: &'a [Program],
}

pub struct ProgramPage<'a> {
    /// Title derived from the requested slug.
    pub slug: &'a str,
    pub program: &'a Program,
    pub seasons: &'a [Season],
    pub actors: &'a [Actor],
}

pub struct SeasonPage<'a> {
    pub season: &'a Season,
    pub program: &'a Program,
    pub episodes: &'a [Episode],
}

pub struct EpisodePage<'a> {
    pub season: &'a Season,
    pub program: &'a Program,
    pub episode: &'a Episode,
    pub comments: &'a [CommentWithAuthor],
    pub form: &'a CommentForm,
    pub errors: Option<&'a Value>,
}

pub struct ActorPage<'a> {
    pub actor: &'a Actor,
    pub programs: &'a [Program],
}

/// Escape text for use in element content and double-quoted attributes.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="fr">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - Wild Series</title>
</head>
<body>
    <nav><a href="/wild">Wild Series</a> <a href="/login">Connexion</a></nav>
    <main>
{body}
    </main>
</body>
</html>
"#,
        title = escape(title),
    ))
}

fn error_list(out: &mut String, messages: &[&str]) {
    if messages.is_empty() {
        return;
    }
    out.push_str("<ul class=\"form-errors\">");
    for msg in messages {
        let _ = write!(out, "<li>{}</li>", escape(msg));
    }
    out.push_str("</ul>\n");
}

fn program_list(out: &mut String, programs: &[Program]) {
    out.push_str("<ul class=\"programs\">\n");
    for program in programs {
        let _ = writeln!(
            out,
            "<li><a href=\"{}\">{}</a></li>",
            escape(&program_path(program)),
            escape(&program.title)
        );
    }
    out.push_str("</ul>\n");
}

fn season_list(out: &mut String, seasons: &[Season]) {
    if seasons.is_empty() {
        out.push_str("<p>Aucune saison.</p>\n");
        return;
    }
    out.push_str("<ul class=\"seasons\">\n");
    for season in seasons {
        let _ = write!(
            out,
            "<li><a href=\"{}\">Saison {}</a>",
            season_path(season.id),
            season.number
        );
        if let Some(year) = season.year {
            let _ = write!(out, " ({year})");
        }
        out.push_str("</li>\n");
    }
    out.push_str("</ul>\n");
}

fn actor_list(out: &mut String, actors: &[Actor]) {
    if actors.is_empty() {
        return;
    }
    out.push_str("<h2>Acteurs</h2>\n<ul class=\"actors\">\n");
    for actor in actors {
        let _ = writeln!(
            out,
            "<li><a href=\"{}\">{}</a></li>",
            escape(&actor_path(&actor.name)),
            escape(&actor.name)
        );
    }
    out.push_str("</ul>\n");
}

fn program_header(out: &mut String, program: &Program) {
    let _ = writeln!(out, "<h1>{}</h1>", escape(&program.title));
    if let Some(poster) = &program.poster {
        let _ = writeln!(
            out,
            "<img class=\"poster\" src=\"{}\" alt=\"{}\">",
            escape(poster),
            escape(&program.title)
        );
    }
    if let Some(summary) = &program.summary {
        let _ = writeln!(out, "<p class=\"summary\">{}</p>", escape(summary));
    }
}

/// `security/login`
pub fn login(page: &LoginPage<'_>) -> Html<String> {
    let mut body = String::from("<h1>Connexion</h1>\n");
    if let Some(error) = page.error {
        let _ = writeln!(body, "<p class=\"error\">{}</p>", escape(error));
    }
    body.push_str("<form method=\"post\" action=\"/login\">\n");
    let _ = writeln!(
        body,
        "<label for=\"username\">Identifiant</label>\n\
         <input type=\"text\" id=\"username\" name=\"username\" value=\"{}\">",
        escape(page.username)
    );
    body.push_str("<label for=\"password\">Mot de passe</label>\n");
    body.push_str("<input type=\"password\" id=\"password\" name=\"password\">\n");
    body.push_str("<button type=\"submit\">Se connecter</button>\n</form>\n");
    layout("Connexion", &body)
}

/// `category/add`
pub fn category_add(page: &CategoryAddPage<'_>) -> Html<String> {
    let mut body = String::from("<h1>Ajouter une catégorie</h1>\n");
    if !page.message.is_empty() {
        let _ = writeln!(body, "<p class=\"flash\">{}</p>", escape(page.message));
    }
    body.push_str("<form method=\"post\" action=\"/category\">\n");
    body.push_str("<label for=\"name\">Nom</label>\n");
    let _ = writeln!(
        body,
        "<input type=\"text\" id=\"name\" name=\"name\" value=\"{}\">",
        escape(&page.form.name)
    );
    error_list(&mut body, &field_errors(page.errors, "name"));
    body.push_str("<button type=\"submit\">Ajouter</button>\n</form>\n");
    layout("Ajouter une catégorie", &body)
}

/// `wild/index`
pub fn wild_index(page: &IndexPage<'_>) -> Html<String> {
    let mut body = String::from("<h1>Toutes les séries</h1>\n");
    body.push_str("<form method=\"post\" action=\"/wild\">\n");
    let _ = writeln!(
        body,
        "<input type=\"search\" name=\"searchField\" value=\"{}\">",
        escape(page.search.unwrap_or_default())
    );
    body.push_str("<button type=\"submit\">Rechercher</button>\n</form>\n");

    if page.programs.is_empty() {
        body.push_str("<p>Aucune série ne correspond à la recherche.</p>\n");
    } else {
        program_list(&mut body, page.programs);
    }

    if !page.categories.is_empty() {
        body.push_str("<h2>Catégories</h2>\n<ul class=\"categories\">\n");
        for category in page.categories {
            let name = escape(&category.name);
            let _ = match category_path(&category.name) {
                Some(path) => writeln!(body, "<li><a href=\"{}\">{name}</a></li>", escape(&path)),
                None => writeln!(body, "<li>{name}</li>"),
            };
        }
        body.push_str("</ul>\n");
    }
    layout("Toutes les séries", &body)
}

/// `wild/show`
pub fn wild_show(page: &ShowPage<'_>) -> Html<String> {
    let mut body = String::new();
    program_header(&mut body, page.program);
    season_list(&mut body, page.seasons);
    actor_list(&mut body, page.actors);
    layout(&page.program.title, &body)
}

/// `wild/category`
pub fn wild_category(page: &CategoryPage<'_>) -> Html<String> {
    let mut body = String::new();
    let _ = writeln!(body, "<h1>{}</h1>", escape(&page.category.name));
    program_list(&mut body, page.programs);
    layout(&page.category.name, &body)
}

/// `wild/program`
pub fn wild_program(page: &ProgramPage<'_>) -> Html<String> {
    let mut body = String::new();
    program_header(&mut body, page.program);
    season_list(&mut body, page.seasons);
    actor_list(&mut body, page.actors);
    layout(page.slug, &body)
}

/// `wild/season`
pub fn wild_season(page: &SeasonPage<'_>) -> Html<String> {
    let mut body = String::new();
    let _ = writeln!(
        body,
        "<h1><a href=\"{}\">{}</a> - Saison {}</h1>",
        escape(&program_path(page.program)),
        escape(&page.program.title),
        page.season.number
    );
    if let Some(description) = &page.season.description {
        let _ = writeln!(body, "<p>{}</p>", escape(description));
    }
    body.push_str("<ol class=\"episodes\">\n");
    for episode in page.episodes {
        let _ = writeln!(
            body,
            "<li><a href=\"{}\">{}. {}</a></li>",
            episode_path(page.program.id, page.season.id, episode.id),
            episode.number,
            escape(&episode.title)
        );
    }
    body.push_str("</ol>\n");
    let title = format!("{} - Saison {}", page.program.title, page.season.number);
    layout(&title, &body)
}

/// `wild/episode`
pub fn wild_episode(page: &EpisodePage<'_>) -> Html<String> {
    let mut body = String::new();
    let _ = writeln!(
        body,
        "<p><a href=\"{}\">{}</a> &rsaquo; <a href=\"{}\">Saison {}</a></p>",
        escape(&program_path(page.program)),
        escape(&page.program.title),
        season_path(page.season.id),
        page.season.number
    );
    let _ = writeln!(
        body,
        "<h1>Épisode {} : {}</h1>",
        page.episode.number,
        escape(&page.episode.title)
    );
    if let Some(synopsis) = &page.episode.synopsis {
        let _ = writeln!(body, "<p class=\"synopsis\">{}</p>", escape(synopsis));
    }

    body.push_str("<h2>Commentaires</h2>\n");
    if page.comments.is_empty() {
        body.push_str("<p>Aucun commentaire.</p>\n");
    } else {
        body.push_str("<ul class=\"comments\">\n");
        for entry in page.comments {
            let _ = writeln!(
                body,
                "<li><strong>{}</strong> {}</li>",
                escape(&entry.author),
                escape(&entry.comment.comment)
            );
        }
        body.push_str("</ul>\n");
    }

    let _ = writeln!(
        body,
        "<form method=\"post\" action=\"{}\">",
        episode_path(page.program.id, page.season.id, page.episode.id)
    );
    let _ = writeln!(
        body,
        "<textarea name=\"comment\">{}</textarea>",
        escape(&page.form.comment)
    );
    error_list(&mut body, &field_errors(page.errors, "comment"));
    body.push_str("<button type=\"submit\">Commenter</button>\n</form>\n");

    layout(&page.episode.title, &body)
}

/// `wild/actor`
pub fn wild_actor(page: &ActorPage<'_>) -> Html<String> {
    let mut body = String::new();
    let _ = writeln!(body, "<h1>{}</h1>", escape(&page.actor.name));
    program_list(&mut body, page.programs);
    layout(&page.actor.name, &body)
}

/// Error page shown for every failed browser request.
pub fn error_page(status: u16, title: &str, message: &str) -> Html<String> {
    let body = format!(
        "<h1>{status} {}</h1>\n<p class=\"error\">{}</p>\n",
        escape(title),
        escape(message)
    );
    layout(title, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn program() -> Program {
        Program {
            id: 3,
            title: "Breaking Bad".into(),
            slug: "breaking-bad".into(),
            summary: Some("Chemistry <script>".into()),
            poster: None,
            category_id: 1,
        }
    }

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(
            escape(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn category_add_shows_message_only_when_set() {
        let form = CategoryForm::default();
        let Html(with) = category_add(&CategoryAddPage {
            form: &form,
            errors: None,
            message: "Votre catégorie a été ajoutée",
        });
        assert!(with.contains("Votre catégorie a été ajoutée"));

        let Html(without) = category_add(&CategoryAddPage {
            form: &form,
            errors: None,
            message: "",
        });
        assert!(!without.contains("class=\"flash\""));
    }

    #[test]
    fn show_page_escapes_program_fields() {
        let program = program();
        let Html(html) = wild_show(&ShowPage {
            program: &program,
            seasons: &[],
            actors: &[],
        });
        assert!(html.contains("<h1>Breaking Bad</h1>"));
        assert!(html.contains("Chemistry &lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn episode_page_posts_back_to_canonical_url() {
        let program = program();
        let season = Season {
            id: 5,
            program_id: 3,
            number: 1,
            year: Some(2008),
            description: None,
        };
        let episode = Episode {
            id: 9,
            season_id: 5,
            number: 1,
            title: "Pilot".into(),
            synopsis: None,
        };
        let form = CommentForm::default();
        let errors = serde_json::json!({ "comment": ["must not be blank"] });
        let Html(html) = wild_episode(&EpisodePage {
            season: &season,
            program: &program,
            episode: &episode,
            comments: &[],
            form: &form,
            errors: Some(&errors),
        });
        assert!(html.contains("action=\"/wild/program/3/season/5/episode/9\""));
        assert!(html.contains("must not be blank"));
    }

    #[test]
    fn index_links_only_resolvable_categories() {
        let categories = [
            Category {
                id: 1,
                name: "Science Fiction".into(),
            },
            Category {
                id: 2,
                name: "Comédie".into(),
            },
        ];
        let Html(html) = wild_index(&IndexPage {
            programs: &[program()],
            categories: &categories,
            search: None,
        });
        assert!(html.contains("<a href=\"/wild/category/science-fiction\">Science Fiction</a>"));
        assert!(html.contains("<li>Comédie</li>"));
    }

    #[test]
    fn login_page_keeps_username_and_shows_error() {
        let Html(html) = login(&LoginPage {
            username: "alice",
            error: Some("invalid credentials"),
        });
        assert!(html.contains("action=\"/login\""));
        assert!(html.contains("value=\"alice\""));
        assert!(html.contains("invalid credentials"));
        assert!(!html.contains("name=\"password\" value"));
    }

    #[test]
    fn actor_links_are_percent_encoded() {
        let actors = [Actor {
            id: 1,
            name: "Bryan Cranston".into(),
        }];
        let mut out = String::new();
        actor_list(&mut out, &actors);
        assert!(out.contains("href=\"/wild/actor/Bryan%20Cranston\""));
    }
}
