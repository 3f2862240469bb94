use std::collections::HashMap;

use crate::{
    error::AtlasError,
    nom_helpers::{dimensions, insets, key_value, point},
    Descriptor, SpriteEntry,
};

/// What a single descriptor line is, before looking at any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Line<'a> {
    Blank,
    /// Unindented, without colon.
    Name(&'a str),
    Field {
        key: &'a str,
        value: &'a str,
        indented: bool,
    },
    /// Indented, without colon.
    Malformed(&'a str),
}

fn classify(line: &str) -> Line<'_> {
    let trimmed = line.trim();

    if trimmed.is_empty() {
        return Line::Blank;
    }

    let indented = line.starts_with(char::is_whitespace);

    match key_value(trimmed) {
        Ok((_, (key, value))) => Line::Field {
            key,
            value,
            indented,
        },
        Err(_) if indented => Line::Malformed(trimmed),
        Err(_) => Line::Name(trimmed),
    }
}

/// Either we are in the page header or inside a sprite block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    TopLevel,
    /// Index into [`Descriptor::sprites`]
    InBlock(usize),
}

/// A name line is the page texture name when the next non blank line is an unindented field,
/// such as `size: 2048,2048`. Only asked before the page name is known and before any sprite.
fn is_page_name(following: &[&str]) -> bool {
    following
        .iter()
        .map(|line| classify(line))
        .find(|line| *line != Line::Blank)
        .is_some_and(|line| matches!(line, Line::Field { indented: false, .. }))
}

struct DescriptorParser {
    descriptor: Descriptor,
    state: State,
    lookup: HashMap<String, usize>,
}

impl DescriptorParser {
    fn new() -> Self {
        Self {
            descriptor: Descriptor::default(),
            state: State::TopLevel,
            lookup: HashMap::new(),
        }
    }

    /// Only one page, and it comes before any sprite.
    fn expects_page_name(&self) -> bool {
        self.descriptor.header.texture.is_none() && self.descriptor.sprites.is_empty()
    }

    fn format_error(&mut self, line: usize, key: &str, value: &str) {
        self.descriptor.errors.push(AtlasError::FormatError {
            line,
            key: key.to_string(),
            value: value.to_string(),
        });
    }

    fn open_block(&mut self, name: &str) {
        // repeated names start over but keep their original position
        let index = match self.lookup.get(name) {
            Some(&index) => {
                self.descriptor.sprites[index] = SpriteEntry::new(name);
                index
            }
            None => {
                self.descriptor.sprites.push(SpriteEntry::new(name));
                let index = self.descriptor.sprites.len() - 1;
                self.lookup.insert(name.to_string(), index);
                index
            }
        };

        self.state = State::InBlock(index);
    }

    fn header_field(&mut self, line: usize, key: &str, value: &str) {
        let header = &mut self.descriptor.header;

        match key {
            "size" => match dimensions(value) {
                Some(size) => header.size = Some(size),
                None => self.format_error(line, key, value),
            },
            "format" => header.format = Some(value.to_string()),
            "filter" => header.filter = Some(value.to_string()),
            "repeat" => header.repeat = Some(value.to_string()),
            _ => (),
        }
    }

    fn sprite_field(&mut self, index: usize, line: usize, key: &str, value: &str) {
        let sprite = &mut self.descriptor.sprites[index];

        let ok = match key {
            "xy" => point(value).map(|xy| sprite.xy = Some(xy)).is_some(),
            "size" => dimensions(value).map(|size| sprite.size = Some(size)).is_some(),
            "split" => insets(value).map(|split| sprite.split = Some(split)).is_some(),
            "pad" => insets(value).map(|pad| sprite.pad = Some(pad)).is_some(),
            _ => true,
        };

        if !ok {
            self.format_error(line, key, value);
        }
    }

    fn line(&mut self, line_index: usize, lines: &[&str]) {
        // people count lines from 1
        let line_number = line_index + 1;

        match classify(lines[line_index]) {
            Line::Blank => (),
            Line::Name(name)
                if self.expects_page_name() && is_page_name(&lines[line_index + 1..]) =>
            {
                self.descriptor.header.texture = Some(name.to_string());
                self.state = State::TopLevel;
            }
            Line::Name(name) => self.open_block(name),
            Line::Field { key, value, .. } => match self.state {
                State::TopLevel => self.header_field(line_number, key, value),
                State::InBlock(index) => self.sprite_field(index, line_number, key, value),
            },
            Line::Malformed(content) => self.descriptor.errors.push(AtlasError::MalformedLine {
                line: line_number,
                content: content.to_string(),
            }),
        }
    }
}

/// Never fails. Problems are collected in [`Descriptor::errors`].
pub fn parse_descriptor(i: &str) -> Descriptor {
    let lines = i.lines().collect::<Vec<&str>>();
    let mut parser = DescriptorParser::new();

    (0..lines.len()).for_each(|line_index| parser.line(line_index, &lines));

    parser.descriptor
}
