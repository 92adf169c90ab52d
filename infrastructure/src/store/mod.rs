pub mod memory;

pub use memory::MemoryConversationStore;
