use crate::ui::{Icon, Theme};
use crossterm::{
    style::{Color, ResetColor, SetForegroundColor},
    ExecutableCommand,
};
use std::io::{self, stdout};

pub fn print_header() -> io::Result<()> {
    let mut stdout = stdout();
    stdout.execute(SetForegroundColor(Color::Green))?;
    println!("  _   _ _______  _______ _____ ");
    println!(" | \\ | | ____\\ \\/ / ____|_   _|");
    println!(" |  \\| |  _|  \\  /\\___ \\ | |  ");
    println!(" | |\\  | |___ /  \\ ___) || |  ");
    println!(" |_| \\_|_____/_/\\_\\____/ |_|  ");
    stdout.execute(ResetColor)?;
    println!();
    println!(
        "{}",
        Theme::primary("Opinionated NextJS + NestJS Full-Stack Scaffold in One Command")
    );
    println!(
        "{} {}",
        Theme::primary(Icon::Bullet),
        Theme::muted(concat!("nexst v", env!("CARGO_PKG_VERSION")))
    );
    println!();
    Ok(())
}
