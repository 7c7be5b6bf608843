use crate::agent::Reply;
use colored::*;

pub fn print_header(text: &str) {
    println!("\n{}", text.bright_cyan().bold());
    println!("{}", "=".repeat(text.len()).bright_cyan());
}

pub fn print_success(text: &str) {
    println!("{}", text.green());
}

pub fn print_error(text: &str) {
    eprintln!("{}", text.red().bold());
}

pub fn print_info(text: &str) {
    println!("{}", text.blue());
}

pub fn print_field(label: &str, value: &str) {
    println!("{} {}", format!("{}:", label).yellow().bold(), value);
}

pub fn print_reply(reply: &Reply) {
    match reply {
        Reply::Answer(text) => println!("{}", text),
        Reply::NoResults(text) => print_info(text),
        Reply::CredentialsRequired | Reply::Degraded { .. } => print_error(reply.text()),
    }
}
