use anyhow::Context;
use kairos::rectification::LifeEvent;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventsInput {
    pub life_events: Vec<LifeEvent>,
    #[serde(default)]
    pub personality: BTreeMap<String, bool>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EventsFile {
    Bare(Vec<LifeEvent>),
    Full(EventsInput),
}

pub fn parse_events(text: &str) -> anyhow::Result<EventsInput> {
    let file: EventsFile = serde_json::from_str(text).context("Failed to parse life events JSON")?;
    Ok(match file {
        EventsFile::Bare(life_events) => EventsInput {
            life_events,
            personality: BTreeMap::new(),
        },
        EventsFile::Full(input) => input,
    })
}

pub fn read_events_file(path: &Path) -> anyhow::Result<EventsInput> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read events file {}", path.display()))?;
    parse_events(&text).with_context(|| format!("Invalid events file {}", path.display()))
}
