pub mod mock_outbound;
