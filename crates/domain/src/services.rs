mod directory;

pub use directory::DirectoryService;
