//! Profile commands

use super::{Context, or_dash};
use pawprint_core::Notice;
use pawprint_store::{ProfileRepository, ProfileSession};

/// Fields given on the command line; `None` leaves a field alone
#[derive(Debug, Default)]
pub struct ProfileEdits {
    pub nick: Option<String>,
    pub about: Option<String>,
    pub pronouns: Option<String>,
    pub accent: Option<String>,
    pub bg_color: Option<String>,
}

impl ProfileEdits {
    fn is_empty(&self) -> bool {
        self.nick.is_none()
            && self.about.is_none()
            && self.pronouns.is_none()
            && self.accent.is_none()
            && self.bg_color.is_none()
    }
}

pub fn show(ctx: &Context) {
    let (profile, report) = ProfileRepository::new(ctx.store()).load();

    println!("Nickname:   {}", profile.display_nick());
    println!("About:      {}", or_dash(&profile.about));
    println!("Pronouns:   {}", or_dash(&profile.pronouns));
    println!("Accent:     {}", or_dash(&profile.accent));
    println!("Background: {}", or_dash(&profile.bg_color));

    if !report.is_clean() {
        println!();
        if let Some(reason) = &report.unreadable {
            println!("Stored profile could not be read ({}); showing defaults", reason);
        }
        for rejection in &report.rejected {
            println!("Ignored stored {}: {}", rejection.field, rejection.reason);
        }
    }
}

pub async fn set(ctx: &Context, edits: ProfileEdits) -> Result<(), Box<dyn std::error::Error>> {
    if edits.is_empty() {
        println!("Nothing to change");
        return Ok(());
    }

    let mut session = ProfileSession::open(ctx.store(), ctx.config.debounce());
    if let Some(nick) = &edits.nick {
        session.set_nick(nick);
    }
    if let Some(about) = &edits.about {
        session.set_about(about);
    }
    if let Some(pronouns) = &edits.pronouns {
        session.set_pronouns(pronouns);
    }
    if let Some(accent) = &edits.accent {
        session.set_accent(accent);
    }
    if let Some(bg) = &edits.bg_color {
        session.set_bg_color(bg);
    }

    let notice = session.save().await;
    session.close().await;

    println!("{}", notice);
    if notice == Notice::SaveFailed {
        return Err(notice.to_string().into());
    }
    Ok(())
}

pub fn theme(ctx: &Context) {
    let profile = ProfileRepository::new(ctx.store()).load().0;

    match profile.theme().resolve() {
        Some(vars) => {
            for (name, value) in vars.css_properties() {
                println!("{}: {};", name, value);
            }
            println!("background: {};", vars.gradient());
        }
        None => println!("No theme colors set"),
    }
}
