// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::App;
use crate::auth::{Route, SessionState};
use anyhow::Result;

pub fn signup(app: &mut App, sub: &clap::ArgMatches) -> Result<()> {
    app.require(Route::Signup)?;
    let name = sub.get_one::<String>("name").unwrap();
    let email = sub.get_one::<String>("email").unwrap();
    let password = sub.get_one::<String>("password").unwrap();
    let user = app.session.signup(name, email, password)?;
    println!("Account created! Welcome to Finance Tracker, {}.", user.name);
    Ok(())
}

pub fn login(app: &mut App, sub: &clap::ArgMatches) -> Result<()> {
    app.require(Route::Login)?;
    let email = sub.get_one::<String>("email").unwrap();
    let password = sub.get_one::<String>("password").unwrap();
    let user = app.session.login(email, password)?;
    println!("Welcome back, {}!", user.name);
    Ok(())
}

pub fn logout(app: &mut App) -> Result<()> {
    app.session.logout()?;
    println!("Logged out");
    Ok(())
}

pub fn whoami(app: &App) -> Result<()> {
    match app.session.state() {
        SessionState::Authenticated(u) => println!("{} <{}> (id {})", u.name, u.email, u.id),
        _ => println!("Not logged in"),
    }
    Ok(())
}

pub fn profile(app: &mut App, m: &clap::ArgMatches) -> Result<()> {
    app.require(Route::Profile)?;
    match m.subcommand() {
        Some(("update", sub)) => {
            let name = sub.get_one::<String>("name").map(String::as_str);
            let email = sub.get_one::<String>("email").map(String::as_str);
            if name.is_none() && email.is_none() {
                return Err(anyhow::anyhow!("Nothing to update; pass --name and/or --email"));
            }
            let user = app.session.update_profile(name, email)?;
            println!("Profile updated: {} <{}>", user.name, user.email);
        }
        Some(("password", sub)) => {
            let current = sub.get_one::<String>("current").unwrap();
            let new = sub.get_one::<String>("new").unwrap();
            app.session.change_password(current, new)?;
            println!("Password changed");
        }
        _ => {}
    }
    Ok(())
}
