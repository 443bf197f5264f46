//! HTML templates.
//!
//! The templates under `templates/` are compiled into the binary. A
//! configured directory replaces them wholesale.

use tera::Tera;
use tracing::info;

use crate::config::TemplatesConfig;
use crate::Result;

macro_rules! builtin {
    ($($name:literal),* $(,)?) => {
        &[$(($name, include_str!(concat!("../../templates/", $name)))),*]
    };
}

const BUILTIN_TEMPLATES: &[(&str, &str)] = builtin![
    "base.html",
    "includes/header.html",
    "includes/paginator.html",
    "includes/post.html",
    "posts/index.html",
    "posts/group_list.html",
    "posts/profile.html",
    "posts/post_detail.html",
    "posts/create_post.html",
    "users/login.html",
    "users/signup.html",
    "users/logged_out.html",
    "core/404.html",
    "core/500.html",
];

/// Build the template set the configuration asks for.
pub fn load(config: &TemplatesConfig) -> Result<Tera> {
    match config.path.as_deref() {
        Some(dir) => {
            let pattern = format!("{}/**/*.html", dir.trim_end_matches('/'));
            let tera = Tera::new(&pattern)?;
            info!("Loaded templates from {}", dir);
            Ok(tera)
        }
        None => builtin(),
    }
}

/// Templates compiled into the binary.
pub fn builtin() -> Result<Tera> {
    let mut tera = Tera::default();
    tera.add_raw_templates(BUILTIN_TEMPLATES.iter().copied())?;
    Ok(tera)
}
