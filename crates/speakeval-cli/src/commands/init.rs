//! The `speakeval init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("speakeval.toml").exists() {
        println!("speakeval.toml already exists, skipping.");
    } else {
        std::fs::write("speakeval.toml", SAMPLE_CONFIG)?;
        println!("Created speakeval.toml");
    }

    std::fs::create_dir_all("exercises")?;
    let example_path = std::path::Path::new("exercises/example.json");
    if example_path.exists() {
        println!("exercises/example.json already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_EXERCISES)?;
        println!("Created exercises/example.json");
    }

    println!("\nNext steps:");
    println!("  1. Add your own sentences to exercises/");
    println!("  2. Run: speakeval validate --exercises exercises");
    println!("  3. Run: speakeval check --exercises exercises --id 1 --candidate \"I go to school\"");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# speakeval configuration

exercises = "exercises"
parallelism = 4
output_dir = "./speakeval-results"

[feedback]
excellent = 0.90
close = 0.85
show_correction = 0.80
"#;

const EXAMPLE_EXERCISES: &str = r#"[
  {
    "id": 1,
    "level": 1,
    "korean": "나는 학교에 가요.",
    "english": ["I go to school.", "I am going to school."]
  },
  {
    "id": 2,
    "level": 1,
    "korean": "안녕하세요, 만나서 반가워요.",
    "english": ["Hello, nice to meet you.", "Hi, nice to meet you."]
  },
  {
    "id": 3,
    "level": 2,
    "korean": "커피 한 잔 주시겠어요?",
    "english": ["Could I have a cup of coffee?", "Can I get a cup of coffee?"]
  },
  {
    "id": 4,
    "level": 2,
    "korean": "어제 친구들이랑 영화를 봤어요.",
    "english": ["I watched a movie with my friends yesterday.", "Yesterday I saw a movie with my friends."]
  }
]
"#;
