//! Account commands

use super::{Context, or_dash};
use pawprint_account::{
    AccountRepository, AccountTheme, Coordinate, FixedLocation, LocationProvider, NoGeolocation,
    Suggestions,
};
use pawprint_core::Notice;
use pawprint_store::ProfileRepository;

/// Fields given on the command line; `None` leaves a field alone
#[derive(Debug, Default)]
pub struct AccountEdits {
    pub email: Option<String>,
    pub password: Option<String>,
    pub birthday: Option<String>,
    pub location: Option<String>,
    pub language: Option<String>,
}

pub fn show(ctx: &Context) {
    let theme = AccountTheme::load(&ProfileRepository::new(ctx.store()));
    let account = AccountRepository::new(ctx.store()).load();

    println!("{}", theme.nick);
    if let Some(vars) = theme.vars() {
        println!("  theme {} -> {}", vars.bg_1, vars.bg_2);
    }
    println!();
    println!("Email:    {}", account.email);
    println!("Password: {}", if account.password.is_empty() { "-" } else { "********" });
    println!("Birthday: {}", or_dash(&account.birthday));
    println!("Location: {}", or_dash(&account.location));
    println!("Language: {}", or_dash(&account.language));
}

pub fn set(ctx: &Context, edits: AccountEdits) -> Result<(), Box<dyn std::error::Error>> {
    let mut repo = AccountRepository::new(ctx.store());
    let mut account = repo.load();

    let fields = [
        (edits.email, &mut account.email),
        (edits.password, &mut account.password),
        (edits.birthday, &mut account.birthday),
        (edits.location, &mut account.location),
        (edits.language, &mut account.language),
    ];
    for (value, slot) in fields {
        if let Some(value) = value {
            *slot = value;
        }
    }

    let notice = repo.save_with_notice(&account);
    println!("{}", notice);
    if notice == Notice::SaveFailed {
        return Err(notice.to_string().into());
    }
    Ok(())
}

pub async fn suggest(
    ctx: &Context,
    position: Option<(f64, f64)>,
    pick: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let provider: Box<dyn LocationProvider> = match position {
        Some((lat, lon)) => Box::new(FixedLocation::new(Coordinate::new(lat, lon))),
        None => Box::new(NoGeolocation),
    };

    let mut suggestions = Suggestions::default();
    for notice in suggestions
        .detect(provider.as_ref(), ctx.config.locate_timeout())
        .await
    {
        println!("{}", notice);
    }

    if !suggestions.is_open() {
        return Ok(());
    }

    for (i, item) in suggestions.items().iter().enumerate() {
        match item.distance_km {
            Some(d) => println!("  {}. {:<20} {:>8.0} km", i + 1, item.label(), d),
            None => println!("  {}. {}", i + 1, item.label()),
        }
    }

    let Some(pick) = pick else {
        return Ok(());
    };

    let mut repo = AccountRepository::new(ctx.store());
    let mut account = repo.load();
    let chosen = pick
        .checked_sub(1)
        .and_then(|index| suggestions.choose(index, &mut account, &mut repo));

    match chosen {
        Some(notice) => {
            println!("Location: {}", account.location);
            println!("{}", notice);
            if notice == Notice::SaveFailed {
                return Err(notice.to_string().into());
            }
            Ok(())
        }
        None => Err(format!("No suggestion number {}", pick).into()),
    }
}
