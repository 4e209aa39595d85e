use std::path::Path;
use std::process::ExitCode;

use cyclescope::error::DataError;
use cyclescope::pipeline::{self, PipelineConfig};

/// Fixed relative paths, matching the export the program is run next to.
const INPUT_FILE: &str = "전산업생산지수(계절조정지수).csv";
const OUTPUT_FILE: &str = "전산업생산지수_경기변동시각화.png";

fn main() -> ExitCode {
    env_logger::init();

    let config = PipelineConfig::default();
    match pipeline::run(Path::new(INPUT_FILE), Path::new(OUTPUT_FILE), &config) {
        Ok(summary) => {
            println!(
                "경기 변동 시각화 그래프가 '{}' 파일로 저장되었습니다.",
                summary.output.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            if matches!(
                e.downcast_ref::<DataError>(),
                Some(DataError::InputNotFound(_))
            ) {
                println!("오류: '{INPUT_FILE}' 파일을 찾을 수 없습니다.");
                println!("실행 파일과 동일한 폴더에 파일이 있는지 확인해주세요.");
            } else {
                log::error!("Failed to build cycle chart: {e:#}");
            }
            ExitCode::FAILURE
        }
    }
}
