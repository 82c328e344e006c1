use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clue {
    pub prompt: String,
    pub answer: String,
}

impl Clue {
    pub fn new(prompt: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            answer: answer.into(),
        }
    }
}

/// A named column of clues keyed by point value (ascending).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub clues: BTreeMap<u32, Clue>,
}

impl Category {
    pub fn values(&self) -> Vec<u32> {
        self.clues.keys().copied().collect()
    }
}

/// Read-only question data: the main board plus the final clue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    categories: Vec<Category>,
    final_clue: Clue,
}

impl Default for Board {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Board {
    pub fn builtin() -> Self {
        let categories = vec![
            category(
                "Networking",
                [
                    (100, "What does TCP stand for?", "Transmission Control Protocol"),
                    (200, "What device forwards packets between networks?", "Router"),
                    (300, "What command shows your IP address in Windows?", "ipconfig"),
                    (400, "What protocol uses port 53?", "DNS"),
                ],
            ),
            category(
                "Cyber Attacks",
                [
                    (100, "What does DDoS stand for?", "Distributed Denial of Service"),
                    (200, "What attack tricks users into giving credentials?", "Phishing"),
                    (300, "What malware encrypts your files?", "Ransomware"),
                    (400, "What attack captures network traffic?", "Packet Sniffing"),
                ],
            ),
            category(
                "Security Tools",
                [
                    (100, "What tool scans networks for open ports?", "Nmap"),
                    (200, "What tool captures packets?", "Wireshark / TShark"),
                    (300, "What tool tests password strength?", "John the Ripper"),
                    (400, "What Linux distro is used for penetration testing?", "Kali Linux"),
                ],
            ),
            category(
                "OSINT",
                [
                    (100, "What does OSINT stand for?", "Open Source Intelligence"),
                    (200, "Name one OSINT search engine.", "Shodan"),
                    (
                        300,
                        "What is the process of gathering public info on a target?",
                        "Reconnaissance",
                    ),
                    (400, "What site is used to check data breaches?", "HaveIBeenPwned"),
                ],
            ),
        ];

        Self {
            categories,
            final_clue: Clue::new(
                "In cybersecurity, what does the CIA triad stand for?",
                "Confidentiality, Integrity, Availability",
            ),
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn clue(&self, category: &str, value: u32) -> Option<&Clue> {
        self.category(category)?.clues.get(&value)
    }

    pub fn final_clue(&self) -> &Clue {
        &self.final_clue
    }

    /// Tallest column; columns may differ in length for custom boards.
    pub fn max_rows(&self) -> usize {
        self.categories
            .iter()
            .map(|c| c.clues.len())
            .max()
            .unwrap_or(0)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let file: BoardFile = serde_json::from_str(raw).context("invalid board json")?;
        file.into_board()
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed reading board file {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("failed loading board {}", path.display()))
    }
}

fn category<const N: usize>(name: &str, rows: [(u32, &str, &str); N]) -> Category {
    Category {
        name: name.to_string(),
        clues: rows
            .into_iter()
            .map(|(value, prompt, answer)| (value, Clue::new(prompt, answer)))
            .collect(),
    }
}

#[derive(Debug, Deserialize)]
struct BoardFile {
    categories: Vec<CategoryFile>,
    #[serde(rename = "final")]
    final_clue: Clue,
}

#[derive(Debug, Deserialize)]
struct CategoryFile {
    name: String,
    clues: Vec<ClueFile>,
}

#[derive(Debug, Deserialize)]
struct ClueFile {
    value: u32,
    prompt: String,
    answer: String,
}

impl BoardFile {
    fn into_board(self) -> Result<Board> {
        if self.categories.is_empty() {
            bail!("board has no categories");
        }
        check_clue_text(&self.final_clue, "final clue")?;

        let mut names = HashSet::new();
        let mut categories = Vec::with_capacity(self.categories.len());
        for cat in self.categories {
            let name = cat.name.trim().to_string();
            if name.is_empty() {
                bail!("category name is empty");
            }
            if !names.insert(name.clone()) {
                bail!("duplicate category {name:?}");
            }
            if cat.clues.is_empty() {
                bail!("category {name:?} has no clues");
            }

            let mut clues = BTreeMap::new();
            for row in cat.clues {
                if row.value == 0 {
                    bail!("category {name:?} has a zero point value");
                }
                let clue = Clue::new(row.prompt, row.answer);
                check_clue_text(&clue, &format!("{name} {}", row.value))?;
                if clues.insert(row.value, clue).is_some() {
                    bail!("category {name:?} repeats value {}", row.value);
                }
            }
            categories.push(Category { name, clues });
        }

        Ok(Board {
            categories,
            final_clue: self.final_clue,
        })
    }
}

fn check_clue_text(clue: &Clue, label: &str) -> Result<()> {
    if clue.prompt.trim().is_empty() {
        bail!("{label}: prompt is empty");
    }
    if clue.answer.trim().is_empty() {
        bail!("{label}: answer is empty");
    }
    Ok(())
}
