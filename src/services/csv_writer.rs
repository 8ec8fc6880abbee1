//! 结果导出服务 - 业务能力层
//!
//! 把结果集写成 CSV：`Article,Sentiment,joy,sadness,anger,fear,disgust`

use std::io::Write;
use std::path::Path;

use csv::Writer;

use crate::error::{AppError, AppResult};
use crate::models::{Emotion, ResultSet};

/// CSV 表头
pub fn header() -> Vec<&'static str> {
    let mut columns = vec!["Article", "Sentiment"];
    columns.extend(Emotion::ALL.iter().map(|e| e.as_str()));
    columns
}

/// 写入任意 writer
pub fn write_results<W: Write>(results: &ResultSet, writer: W) -> AppResult<()> {
    let mut writer = Writer::from_writer(writer);

    writer.write_record(header())?;

    for row in results.rows() {
        let mut record = vec![row.article.clone(), row.sentiment.to_string()];
        record.extend(row.emotions.iter().map(|(_, score)| score.to_string()));
        writer.write_record(&record)?;
    }

    writer
        .flush()
        .map_err(|e| AppError::file_write_failed("csv", e))?;
    Ok(())
}

/// 导出到文件
pub fn export_csv(results: &ResultSet, path: impl AsRef<Path>) -> AppResult<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)
        .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))?;
    write_results(results, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnalysisResult, EmotionVector, StepStatus};

    fn row(article: &str, sentiment: f64, joy: f64) -> AnalysisResult {
        AnalysisResult {
            article: article.to_string(),
            sentiment,
            emotions: EmotionVector {
                joy,
                ..Default::default()
            },
            source_text: String::new(),
            translated_text: String::new(),
            translation: StepStatus::Completed,
            analysis: StepStatus::Completed,
        }
    }

    #[test]
    fn test_header_and_rows_in_order() {
        let mut results = ResultSet::new();
        results.push(row("b.txt", -0.5, 0.25));
        results.push(row("a, quoted.txt", 0.0, 0.0));

        let mut buf = Vec::new();
        write_results(&results, &mut buf).unwrap();
        let csv = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = csv.lines().collect();

        assert_eq!(lines[0], "Article,Sentiment,joy,sadness,anger,fear,disgust");
        assert_eq!(lines[1], "b.txt,-0.5,0.25,0,0,0,0");
        assert_eq!(lines[2], "\"a, quoted.txt\",0,0,0,0,0,0");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analysis_results.csv");

        let mut results = ResultSet::new();
        results.push(row("a.txt", 0.1, 0.2));
        export_csv(&results, &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let records: Vec<_> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 1);
        assert_eq!(&records[0][0], "a.txt");
        assert_eq!(&records[0][2], "0.2");
    }
}
