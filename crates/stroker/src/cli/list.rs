use anyhow::Result;
use clap::Args;
use serde::Serialize;
use stroker_core::PatternKind;

#[derive(Args)]
pub struct ListArgs {
    /// Print one JSON object per pattern instead of a table.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct Entry {
    index: usize,
    slug: &'static str,
    name: &'static str,
}

impl ListArgs {
    pub fn run(&self) -> Result<()> {
        for (index, kind) in PatternKind::ALL.into_iter().enumerate() {
            if self.json {
                let entry = Entry {
                    index,
                    slug: kind.slug(),
                    name: kind.name(),
                };
                println!("{}", serde_json::to_string(&entry)?);
            } else {
                println!("{index:>2}  {:<17} {}", kind.slug(), kind.name());
            }
        }
        Ok(())
    }
}
