/// Use cases module containing application business logic orchestration
mod scan_targets;

pub use scan_targets::ScanUseCase;
