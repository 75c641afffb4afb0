use beanbot_parser::{tokenize, ParseOptions};

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let message = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if message.is_empty() {
        return Err("message argument".into());
    }

    let parsed = tokenize(&message, &ParseOptions::default())?;
    dbg!(parsed);
    Ok(())
}

fn main() {
    match run() {
        Err(e) => println!("Error: {}", e),
        _ => {}
    }
}
