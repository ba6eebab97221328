use clarion::prelude::*;
use clarion::{ArgumentParser, EnumCodec, IntCodec, Parameter, StringCodec};

fn main() {
    let mut parser = ArgumentParser::new("greeter");
    let loud = parser
        .add(
            Parameter::switch("loud")
                .single_letter_name('l')
                .description("Shout the greeting"),
        )
        .expect("Invalid argument parser configuration");
    let times = parser
        .add(
            Parameter::option_with_default("times", IntCodec, 1)
                .single_letter_name('t')
                .parameter_name("count")
                .description("How many times to greet"),
        )
        .expect("Invalid argument parser configuration");
    let language = parser
        .add(
            Parameter::option_with_default(
                "language",
                EnumCodec::new("language", [("en", "Hello"), ("fr", "Bonjour"), ("de", "Hallo")]),
                "Hello",
            )
            .description("The language of the greeting"),
        )
        .expect("Invalid argument parser configuration");
    let names = parser
        .add(Parameter::repeated_positional("name", StringCodec).description("Who to greet"))
        .expect("Invalid argument parser configuration");

    if !parser.try_parse_env().expect("Invalid argument parser configuration") {
        std::process::exit(1);
    }

    let mut names = names.value();

    if names.is_empty() {
        names.push("world".to_string());
    }

    for _ in 0..times.value() {
        for name in &names {
            let greeting = format!("{}, {name}!", language.value());

            if loud.value() {
                println!("{}", greeting.to_uppercase());
            } else {
                println!("{greeting}");
            }
        }
    }
}
