use anyhow::Context;
use concept_classifier::prelude::*;
// cargo run --bin classify_entity -- --concepts concepts.yaml --concept-id 1 --entity dog --description "a domesticated canine"

#[tokio::main]
pub async fn main() -> anyhow::Result<()> {
    let matches = command().get_matches();
    let procedure = procedure_builder(&matches)?.init()?;

    let entity = matches
        .get_one::<String>("entity")
        .context("entity missing")?;
    let description = matches
        .get_one::<String>("description")
        .context("description missing")?;
    let result = procedure.classify(entity, description).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);

    if matches.get_flag("verdict") {
        let verdict = result.verdict()?;
        println!("{verdict}");
    }
    Ok(())
}

fn command() -> clap::Command {
    clap::Command::new("Concept Classifier")
        .version("1.0")
        .about("Classifies an entity against a concept definition with a two stage LLM prompt")
        .arg(
            clap::Arg::new("concepts")
                .help("YAML file holding a list of concepts")
                .long("concepts")
                .conflicts_with_all(["term", "definition"]),
        )
        .arg(
            clap::Arg::new("concept_id")
                .help("Id of the concept, inline or within the concepts file")
                .long("concept-id")
                .alias("id")
                .default_value("0"),
        )
        .arg(clap::Arg::new("term").help("Concept term").long("term"))
        .arg(
            clap::Arg::new("definition")
                .help("Concept definition")
                .long("definition"),
        )
        .arg(
            clap::Arg::new("reference")
                .help("URL of the definition's source")
                .long("reference")
                .default_value(""),
        )
        .arg(
            clap::Arg::new("entity")
                .help("Name of the entity to classify")
                .long("entity")
                .required(true),
        )
        .arg(
            clap::Arg::new("description")
                .help("Description of the entity")
                .long("description")
                .required(true),
        )
        .arg(
            clap::Arg::new("model")
                .help("Model name")
                .long("model")
                .default_value("gpt-4"),
        )
        .arg(
            clap::Arg::new("temperature")
                .help("Sampling temperature")
                .long("temperature")
                .value_parser(clap::value_parser!(f32))
                .default_value("0.1"),
        )
        .arg(
            clap::Arg::new("verdict")
                .help("Fail unless the answer is exactly positive or negative")
                .long("verdict")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("log")
                .help("Log to stderr and the logs dir; stdout carries only the result")
                .long("log")
                .action(clap::ArgAction::SetTrue),
        )
}

fn procedure_builder(matches: &clap::ArgMatches) -> anyhow::Result<ClassificationProcedureBuilder> {
    let concept_id = matches
        .get_one::<String>("concept_id")
        .context("concept id missing")?;
    let concept = match matches.get_one::<String>("concepts") {
        Some(path) => {
            let concepts = load_concepts(path)?;
            find_concept(&concepts, concept_id)
                .cloned()
                .with_context(|| format!("concept '{concept_id}' not found in {path}"))?
        }
        None => Concept::new(
            concept_id.to_owned(),
            matches
                .get_one::<String>("term")
                .context("--term is required without --concepts")?
                .to_owned(),
            matches
                .get_one::<String>("definition")
                .context("--definition is required without --concepts")?
                .to_owned(),
            matches
                .get_one::<String>("reference")
                .cloned()
                .unwrap_or_default(),
        ),
    };

    let model = matches
        .get_one::<String>("model")
        .context("model missing")?;
    let temperature = *matches
        .get_one::<f32>("temperature")
        .context("temperature missing")?;

    Ok(ClassificationProcedure::builder(concept)
        .model(model)
        .temperature(temperature)
        .logging_enabled(matches.get_flag("log")))
}
