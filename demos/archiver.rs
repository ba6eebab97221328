use clarion::prelude::*;
use clarion::{ArgumentParser, FromStrCodec, Parameter, StringCodec};
use std::path::PathBuf;

fn main() {
    let mut parser = ArgumentParser::builder("archiver")
        .verb_term("command")
        .build();
    let verbose = parser
        .add(
            Parameter::switch("verbose")
                .single_letter_name('v')
                .description("Report every file"),
        )
        .expect("Invalid argument parser configuration");
    let verbose_create = verbose.clone();
    let create = parser
        .add(Parameter::verb(
            "create",
            "Create an archive",
            move |child| {
                let level = child.add(
                    Parameter::option_with_default("level", FromStrCodec::<u8>::new("level"), 6)
                        .single_letter_name('l')
                        .description("The compression level")
                        .preset(9),
                )?;
                let output = child.add(
                    Parameter::required_positional("archive", StringCodec)
                        .description("The archive to create"),
                )?;
                let inputs = child.add(
                    Parameter::repeated_positional("file", StringCodec)
                        .description("The files to add"),
                )?;

                if child.try_parse()? {
                    println!(
                        "Creating {} at level {}.",
                        PathBuf::from(output.value()).display(),
                        level.value()
                    );

                    if verbose_create.value() {
                        for input in inputs.value() {
                            println!("  adding {input}");
                        }
                    }
                }

                Ok(())
            },
        ))
        .expect("Invalid argument parser configuration");
    let list = parser
        .add_verb("list", "List the contents of an archive", |child| {
            let archive = child.add_required_positional("archive", StringCodec)?;

            if child.try_parse()? {
                println!("Listing {}.", archive.value());
            }

            Ok(())
        })
        .expect("Invalid argument parser configuration");

    if !parser.try_parse_env().expect("Invalid argument parser configuration") {
        std::process::exit(1);
    }

    if verbose.value() {
        for line in parser.dump() {
            println!("{line}");
        }
    }

    assert!(create.is_selected() || list.is_selected());
}
