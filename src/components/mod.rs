pub mod neural_network;
