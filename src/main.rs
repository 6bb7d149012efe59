use anyhow::Result;
use argh::FromArgs;
use mdtoc::Options;
use std::fs;
use std::path::PathBuf;

/// Generate a table of contents from the headings of a Markdown file.
#[derive(FromArgs)]
struct Args {
    /// markdown file to read
    #[argh(positional)]
    file: PathBuf,

    /// rewrite the file, inserting the toc between <!-- toc --> markers
    #[argh(switch, short = 'i')]
    in_place: bool,

    /// print the toc entries as json instead of a bullet list
    #[argh(switch)]
    json: bool,

    /// deepest heading level to include, counted from the highest
    #[argh(option)]
    maxdepth: Option<usize>,

    /// leave out the first top-level heading
    #[argh(switch)]
    no_firsth1: bool,

    /// bullet marker to use; repeat the flag for deeper levels
    #[argh(option)]
    bullet: Vec<String>,

    /// render plain entries instead of links
    #[argh(switch)]
    no_links: bool,
}

fn main() -> Result<()> {
    let args: Args = argh::from_env();

    let mut options = Options {
        maxdepth: args.maxdepth,
        firsth1: !args.no_firsth1,
        linkify: !args.no_links,
        ..Options::default()
    };
    if !args.bullet.is_empty() {
        options.bullets = args.bullet;
    }

    let source = fs::read_to_string(&args.file)?;
    if args.in_place {
        let updated = mdtoc::insert(&source, &options)?;
        fs::write(&args.file, updated)?;
    } else if args.json {
        let result = mdtoc::toc(&source, &options)?;
        println!("{}", serde_json::to_string_pretty(&result.json)?);
    } else {
        let result = mdtoc::toc(&source, &options)?;
        println!("{}", result.content);
    }
    Ok(())
}
