mod file_allocator;

pub use file_allocator::FileInvoiceNumberAllocator;
