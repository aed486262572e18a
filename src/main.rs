use clap::{arg, crate_version, Command};
use wbwt::{compress, decompress, deserialize, serialize, STD_OPTIONS};

const RCH: &str = "unreachable was reached";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let long_help =
"Examples:
---------
Compress:   `wbwt compress -i note.md -o note.wbwt`
Decompress: `wbwt decompress -i note.wbwt -o note.md`";

    let mut main_cmd = Command::new("wbwt")
        .about("Word-based Burrows-Wheeler compression for short, word-repetitive text")
        .after_long_help(long_help)
        .version(crate_version!());
    main_cmd = main_cmd.subcommand(Command::new("compress")
        .arg(arg!(-i --input <PATH> "input path").required(true))
        .arg(arg!(-o --output <PATH> "output path").required(true))
        .about("compress a text file into a WBWT frame"));

    main_cmd = main_cmd.subcommand(Command::new("decompress")
        .arg(arg!(-i --input <PATH> "input path").required(true))
        .arg(arg!(-o --output <PATH> "output path").required(true))
        .about("decompress a WBWT frame into text"));

    let matches = main_cmd.get_matches();

    if let Some(cmd) = matches.subcommand_matches("compress") {
        let path_in = cmd.get_one::<String>("input").expect(RCH);
        let path_out = cmd.get_one::<String>("output").expect(RCH);
        let text = std::fs::read_to_string(path_in)?;
        if text.chars().count() > STD_OPTIONS.max_input_chars {
            log::warn!(
                "input exceeds {} characters, compressing anyway",
                STD_OPTIONS.max_input_chars
            );
        }
        let payload = compress(&text);
        let bytes = serialize(&payload);
        std::fs::write(path_out, bytes)?;
    }

    if let Some(cmd) = matches.subcommand_matches("decompress") {
        let path_in = cmd.get_one::<String>("input").expect(RCH);
        let path_out = cmd.get_one::<String>("output").expect(RCH);
        let bytes = std::fs::read(path_in)?;
        let payload = deserialize(&bytes)?;
        let text = decompress(&payload);
        std::fs::write(path_out, text)?;
    }

    Ok(())
}
