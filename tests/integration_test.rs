use collate_answers::models::{load_document, MatchStatus};
use collate_answers::utils::logging;
use collate_answers::{App, Config};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;

fn md(source: &str) -> Value {
    json!({"cell_type": "markdown", "metadata": {}, "source": source})
}

fn question(source: &str) -> Value {
    json!({"cell_type": "markdown", "metadata": {"is_question": true}, "source": source})
}

fn write_nb(path: &Path, cells: Vec<Value>) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let nb = json!({
        "cells": cells,
        "metadata": {"kernelspec": {"name": "python3"}},
        "nbformat": 4,
        "nbformat_minor": 2
    });
    fs::write(path, serde_json::to_string_pretty(&nb).unwrap()).unwrap();
}

/// 准备一个班级：模板两道题（第二道为问卷），三位学生
fn setup(root: &Path, include_owner_names: bool) -> Config {
    write_nb(
        &root.join("template.ipynb"),
        vec![
            md("# Day 1"),
            question("## Exercise 1\nDescribe X"),
            md(""),
            question("## Reading Journal feedback\nHow long did this take?"),
            md(""),
        ],
    );

    let subs = root.join("submissions");
    write_nb(
        &subs.join("day1-alice").join("day1.ipynb"),
        vec![
            md("# Day 1"),
            md("## Exercise 1\nDescribe X"),
            md("answer A"),
            md("## Reading Journal feedback\nHow long did this take?"),
            md("2 hours"),
        ],
    );
    write_nb(
        &subs.join("day1-bob").join("day1.ipynb"),
        vec![
            md("## Exercise 1\nDescrbe X"),
            md("answer B"),
            md("## Reading Journal feedback\nHow long did this take?"),
            md(""),
        ],
    );
    write_nb(
        &subs.join("day1-carol").join("day1.ipynb"),
        vec![md("I did not use the template at all"), md("random")],
    );
    fs::create_dir_all(subs.join("day1-dave")).unwrap();
    fs::write(subs.join("day1-dave").join("day1.ipynb"), "not a notebook").unwrap();

    fs::write(
        root.join("Roster.csv"),
        "GitHub Login,Preferred,Last\nalice,Alice,Anders\nbob,Bob,Brown\n",
    )
    .unwrap();

    Config {
        template_path: root.join("template.ipynb").display().to_string(),
        submissions_dir: subs.display().to_string(),
        notebook_name: "day1.ipynb".to_string(),
        roster_path: Some(root.join("Roster.csv").display().to_string()),
        output_dir: root.join("out").display().to_string(),
        output_log_file: root.join("run.txt").display().to_string(),
        include_owner_names,
        ..Config::default()
    }
}

fn merged_texts(path: &Path) -> Vec<String> {
    load_document(path)
        .unwrap()
        .blocks
        .into_iter()
        .map(|b| b.text)
        .collect()
}

#[test]
fn test_anonymous_merge() {
    let dir = tempfile::tempdir().unwrap();
    let config = setup(dir.path(), false);

    let summary = App::initialize(config).unwrap().run().unwrap();

    assert_eq!(summary.prompts, 2);
    assert_eq!(summary.submissions, 3);
    assert_eq!(summary.skipped, 1);
    // alice 两题，bob 一题
    assert_eq!(summary.answered, 3);

    let texts = merged_texts(&summary.merged_path);
    assert_eq!(
        texts,
        vec![
            "## Exercise 1\nDescribe X",
            "answer A",
            "answer B",
            "## Reading Journal feedback\nHow long did this take?",
            "2 hours",
        ]
    );

    let merged = load_document(&summary.merged_path).unwrap();
    assert_eq!(merged.metadata["kernelspec"]["name"], json!("python3"));
}

#[test]
fn test_owner_names_merge() {
    let dir = tempfile::tempdir().unwrap();
    let config = setup(dir.path(), true);

    let summary = App::initialize(config).unwrap().run().unwrap();
    let texts = merged_texts(&summary.merged_path);

    assert_eq!(
        &texts[..5],
        &[
            "## Exercise 1\nDescribe X",
            "#### Alice Anders",
            "answer A",
            "#### Bob Brown",
            "answer B",
        ]
    );
}

#[test]
fn test_reports_written() {
    let dir = tempfile::tempdir().unwrap();
    let config = setup(dir.path(), false);
    let out = dir.path().join("out");
    logging::init(false, Some(&config.output_log_file)).unwrap();

    let summary = App::initialize(config).unwrap().run().unwrap();

    let tally = fs::read_to_string(out.join("answer_counts.csv")).unwrap();
    let lines: Vec<&str> = tally.lines().collect();
    assert_eq!(lines[0], "Question,alice,bob,carol,Total");
    assert_eq!(lines[1], "Exercise 1,true,true,false,2");
    assert_eq!(lines[2], "Reading Journal feedback,true,false,false,1");
    assert_eq!(lines[3], "Total,2,1,0,3");

    let poll = fs::read_to_string(out.join("polls").join("reading_journal_feedback.csv")).unwrap();
    assert_eq!(poll, "Owner,Response\nAlice Anders,2 hours\n");

    // carol 两题都未找到；bob 的问卷为空白
    let missing = fs::read_to_string(out.join("missing_answers.txt")).unwrap();
    assert_eq!(summary.missing, 3);
    assert_eq!(missing.lines().count(), 3);
    assert!(missing.contains("carol"));
    assert!(missing.contains(&MatchStatus::Blank.to_string()));

    let log = fs::read_to_string(dir.path().join("run.txt")).unwrap();
    assert!(log.contains("作业合并日志"));
}

#[test]
fn test_rerun_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        clear_outputs: true,
        ..setup(dir.path(), false)
    };

    let first = App::initialize(config.clone()).unwrap().run().unwrap();
    let first_bytes = fs::read(&first.merged_path).unwrap();
    let second = App::initialize(config).unwrap().run().unwrap();
    let second_bytes = fs::read(&second.merged_path).unwrap();

    assert_eq!(first, second);
    assert_eq!(first_bytes, second_bytes);
}

#[test]
fn test_template_without_questions() {
    let dir = tempfile::tempdir().unwrap();
    let config = setup(dir.path(), false);
    write_nb(Path::new(&config.template_path), vec![md("# Nothing to answer")]);

    let summary = App::initialize(config).unwrap().run().unwrap();

    assert_eq!(summary.prompts, 0);
    assert!(merged_texts(&summary.merged_path).is_empty());
}

#[test]
fn test_missing_template_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        template_path: dir.path().join("nope.ipynb").display().to_string(),
        ..setup(dir.path(), false)
    };

    assert!(App::initialize(config).is_err());
}
