use crossterm::execute;
use crossterm::style::{Color, ResetColor, SetForegroundColor};

pub fn success(s: &str) {
    let mut stdout = std::io::stdout();
    let _ = execute!(stdout, SetForegroundColor(Color::Green));
    println!("{s}");
    let _ = execute!(stdout, ResetColor);
}

pub fn failure(s: &str) {
    let mut stderr = std::io::stderr();
    let _ = execute!(stderr, SetForegroundColor(Color::Red));
    eprintln!("{s}");
    let _ = execute!(stderr, ResetColor);
}
