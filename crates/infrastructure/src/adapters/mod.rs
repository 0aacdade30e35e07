pub mod call_counter;
pub mod file_photo_loader;
pub mod in_memory_directory;
pub mod number;
pub mod static_block_list;
pub mod static_screening_transport;

pub use call_counter::ActiveCallCounter;
pub use file_photo_loader::FilePhotoLoader;
pub use in_memory_directory::InMemoryDirectory;
pub use number::normalize_number;
pub use static_block_list::StaticBlockList;
pub use static_screening_transport::StaticScreeningTransport;
